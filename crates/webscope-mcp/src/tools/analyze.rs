//! Tool: analyze — Run a Lighthouse audit against a URL.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use webscope::{AuditCategory, AuditOptions, OutputFormat};

use crate::config::resolve_report_dir;
use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeParams {
    url: String,
    #[serde(default = "AuditCategory::default_set")]
    categories: Vec<AuditCategory>,
    #[serde(default)]
    format: OutputFormat,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    only_metrics: bool,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "analyze".to_string(),
        description: Some("Run a Lighthouse audit against a URL and report the results".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "description": "The URL to audit" },
                "categories": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ["performance", "accessibility", "best-practices", "seo", "pwa"]
                    },
                    "description": "Audit categories to run",
                    "default": ["performance", "accessibility", "best-practices", "seo"]
                },
                "format": {
                    "type": "string",
                    "enum": ["html", "json", "pdf"],
                    "description": "Report output format",
                    "default": "json"
                },
                "outputPath": {
                    "type": "string",
                    "description": "Directory to write the report into",
                    "default": "./reports"
                },
                "onlyMetrics": {
                    "type": "boolean",
                    "description": "Return only the derived metrics summary",
                    "default": false
                }
            },
            "required": ["url"]
        }),
    }
}

pub async fn execute(
    args: Value,
    _session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: AnalyzeParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    // The metrics summary needs the structured report, so an onlyMetrics run
    // always asks the engine for json.
    let format = if params.only_metrics {
        OutputFormat::Json
    } else {
        params.format
    };

    let options = AuditOptions {
        url: params.url,
        categories: params.categories,
        format,
        output_path: Some(resolve_report_dir(params.output_path.as_deref())),
        only_metrics: params.only_metrics,
    };

    let outcome = match webscope::run_audit(&options) {
        Ok(outcome) => outcome,
        Err(e) => {
            return Ok(ToolCallResult::json(&json!({
                "success": false,
                "error": e.to_string()
            })));
        }
    };

    let file_path = outcome
        .file_path
        .as_ref()
        .map(|p| p.display().to_string());

    if params.only_metrics {
        let report = outcome.report.as_ref().ok_or_else(|| {
            McpError::AuditFailed("Lighthouse produced no structured report".to_string())
        })?;
        let metrics = webscope::extract_metrics(report);
        if let Some(error) = metrics.get("error") {
            return Ok(ToolCallResult::json(&json!({
                "success": false,
                "error": error
            })));
        }
        return Ok(ToolCallResult::json(&json!({
            "success": true,
            "metrics": metrics,
            "filePath": file_path
        })));
    }

    match outcome.report {
        // Full detail requested as json: hand back the raw audit payload.
        Some(report) => Ok(ToolCallResult::json(&report)),
        None => Ok(ToolCallResult::json(&json!({
            "success": true,
            "format": outcome.format.as_str(),
            "filePath": file_path,
            "report": outcome.body
        }))),
    }
}
