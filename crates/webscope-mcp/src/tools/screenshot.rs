//! Tool: screenshot — Capture the page or a single element as PNG.

use std::sync::Arc;
use tokio::sync::Mutex;

use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct ScreenshotParams {
    name: String,
    #[serde(default)]
    selector: Option<String>,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "screenshot".to_string(),
        description: Some("Take a screenshot of the current page or a specific element".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Name for the screenshot" },
                "selector": { "type": "string", "description": "CSS selector for an element to capture" },
                "width": { "type": "number", "description": "Viewport width in pixels", "default": 800 },
                "height": { "type": "number", "description": "Viewport height in pixels", "default": 600 }
            },
            "required": ["name"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: ScreenshotParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let page = session.current_page()?;
    let png = webscope::browser::screenshot(
        &page,
        params.selector.as_deref(),
        params.width,
        params.height,
    )?;

    let data = base64::engine::general_purpose::STANDARD.encode(&png);
    session.store_screenshot(params.name.clone(), data.clone());

    let output = format!(
        "Screenshot '{}' taken at {}x{}",
        params.name, params.width, params.height
    );

    Ok(ToolCallResult::with_image(
        output,
        data,
        "image/png".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_defaults_to_800_by_600() {
        let params: ScreenshotParams =
            serde_json::from_value(json!({ "name": "home" })).unwrap();
        assert_eq!(params.width, 800);
        assert_eq!(params.height, 600);
        assert!(params.selector.is_none());
    }

    #[test]
    fn name_is_required() {
        let result: Result<ScreenshotParams, _> =
            serde_json::from_value(json!({ "selector": "#hero" }));
        assert!(result.is_err());
    }
}
