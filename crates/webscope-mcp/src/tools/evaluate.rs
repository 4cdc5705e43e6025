//! Tool: evaluate — Run a script in the page and collect console output.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct EvaluateParams {
    script: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "evaluate".to_string(),
        description: Some("Execute JavaScript in the browser console".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "script": { "type": "string", "description": "JavaScript code to execute" }
            },
            "required": ["script"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: EvaluateParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let page = session.current_page()?;
    let (value, logs) = webscope::browser::evaluate(&page, &params.script)?;

    let joined = logs.join("\n");
    session.push_console_logs(logs);

    Ok(ToolCallResult::json(&json!({
        "Execution result:": value,
        "Console output:": joined
    })))
}
