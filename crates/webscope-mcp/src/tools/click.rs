//! Tool: click — Click an element by CSS selector.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct ClickParams {
    selector: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "click".to_string(),
        description: Some("Click an element on the page".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "selector": { "type": "string", "description": "CSS selector for the element to click" }
            },
            "required": ["selector"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: ClickParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let page = session.current_page()?;
    webscope::browser::click(&page, &params.selector)?;

    Ok(ToolCallResult::json(&json!({
        "selector": params.selector,
        "action": "click"
    })))
}
