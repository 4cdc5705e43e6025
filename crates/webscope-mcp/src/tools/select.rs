//! Tool: select — Choose an option in a select element.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct SelectParams {
    selector: String,
    value: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "select".to_string(),
        description: Some("Select an option in a dropdown element".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "selector": { "type": "string", "description": "CSS selector for the select element" },
                "value": { "type": "string", "description": "Option value to select" }
            },
            "required": ["selector", "value"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: SelectParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let page = session.current_page()?;
    webscope::browser::select(&page, &params.selector, &params.value)?;

    Ok(ToolCallResult::json(&json!({
        "selector": params.selector,
        "action": "select",
        "value": params.value
    })))
}
