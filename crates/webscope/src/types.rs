//! Core data types for audit runs and engine errors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lighthouse audit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditCategory {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
    Pwa,
}

impl AuditCategory {
    /// Category id as Lighthouse spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditCategory::Performance => "performance",
            AuditCategory::Accessibility => "accessibility",
            AuditCategory::BestPractices => "best-practices",
            AuditCategory::Seo => "seo",
            AuditCategory::Pwa => "pwa",
        }
    }

    /// The default category set for a full audit (everything except PWA).
    pub fn default_set() -> Vec<AuditCategory> {
        vec![
            AuditCategory::Performance,
            AuditCategory::Accessibility,
            AuditCategory::BestPractices,
            AuditCategory::Seo,
        ]
    }
}

/// Report output format requested from the audit engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    #[default]
    Json,
    Pdf,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// File extension for a persisted report.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

/// Options for one audit run, built fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditOptions {
    pub url: String,
    pub categories: Vec<AuditCategory>,
    pub format: OutputFormat,
    pub output_path: Option<PathBuf>,
    pub only_metrics: bool,
}

impl AuditOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            categories: AuditCategory::default_set(),
            format: OutputFormat::Json,
            output_path: None,
            only_metrics: false,
        }
    }
}

/// The result of one audit run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub format: OutputFormat,
    /// Parsed report, present when the format is json.
    pub report: Option<Value>,
    /// Raw report body as produced by the engine.
    pub body: String,
    /// Where the report was persisted, when an output path was requested.
    pub file_path: Option<PathBuf>,
}

/// Errors from the browser and audit engines.
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Action failed: {0}")]
    Action(String),

    #[error("Audit failed: {0}")]
    Audit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type WebResult<T> = Result<T, WebError>;
