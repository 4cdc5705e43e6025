//! Tool registration and dispatch.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::Value;

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{analyze, click, evaluate, fill, get_metrics, hover, navigate, screenshot, select};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            navigate::definition(),
            screenshot::definition(),
            click::definition(),
            fill::definition(),
            select::definition(),
            hover::definition(),
            evaluate::definition(),
            analyze::definition(),
            get_metrics::definition(),
        ]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        session: &Arc<Mutex<BrowserSessionManager>>,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            "navigate" => navigate::execute(args, session).await,
            "screenshot" => screenshot::execute(args, session).await,
            "click" => click::execute(args, session).await,
            "fill" => fill::execute(args, session).await,
            "select" => select::execute(args, session).await,
            "hover" => hover::execute(args, session).await,
            "evaluate" => evaluate::execute(args, session).await,
            "analyze" => analyze::execute(args, session).await,
            "get_metrics" => get_metrics::execute(args, session).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_all_nine_tools() {
        let tools = ToolRegistry::list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "navigate",
                "screenshot",
                "click",
                "fill",
                "select",
                "hover",
                "evaluate",
                "analyze",
                "get_metrics"
            ]
        );
    }

    #[test]
    fn every_tool_declares_an_object_schema() {
        for tool in ToolRegistry::list_tools() {
            assert_eq!(
                tool.input_schema["type"], "object",
                "tool {} should declare an object schema",
                tool.name
            );
        }
    }
}
