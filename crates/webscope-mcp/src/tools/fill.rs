//! Tool: fill — Clear an input and type a value into it.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct FillParams {
    selector: String,
    value: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "fill".to_string(),
        description: Some("Fill an input field with a value".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "selector": { "type": "string", "description": "CSS selector for the input field" },
                "value": { "type": "string", "description": "Value to fill" }
            },
            "required": ["selector", "value"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: FillParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let page = session.current_page()?;
    webscope::browser::fill(&page, &params.selector, &params.value)?;

    Ok(ToolCallResult::json(&json!({
        "selector": params.selector,
        "action": "fill",
        "chars": params.value.len()
    })))
}
