//! Tool: get_metrics — Audit a URL and return only the metrics summary.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use webscope::{AuditCategory, AuditOptions, OutputFormat};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct GetMetricsParams {
    url: String,
    #[serde(default = "default_categories")]
    categories: Vec<AuditCategory>,
}

fn default_categories() -> Vec<AuditCategory> {
    vec![AuditCategory::Performance]
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_metrics".to_string(),
        description: Some("Audit a URL and return key performance metrics".to_string()),
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
                    "default": ["performance"]
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
    let params: GetMetricsParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let options = AuditOptions {
        url: params.url,
        categories: params.categories,
        format: OutputFormat::Json,
        output_path: None,
        only_metrics: true,
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

    let report = outcome
        .report
        .ok_or_else(|| McpError::AuditFailed("Lighthouse produced no structured report".to_string()))?;

    let metrics = webscope::extract_metrics(&report);
    if let Some(error) = metrics.get("error") {
        return Ok(ToolCallResult::json(&json!({
            "success": false,
            "error": error
        })));
    }

    Ok(ToolCallResult::json(&json!({
        "success": true,
        "metrics": metrics
    })))
}
