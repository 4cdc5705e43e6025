//! Tool: navigate — Load a URL in the current page.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct NavigateParams {
    url: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "navigate".to_string(),
        description: Some("Navigate the browser to a URL and wait for the page to settle".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "description": "The URL to navigate to" }
            },
            "required": ["url"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: NavigateParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let page = session.current_page()?;
    let title = webscope::browser::navigate(&page, &params.url)?;

    Ok(ToolCallResult::json(&json!({
        "url": params.url,
        "title": title,
        "status": "loaded"
    })))
}
