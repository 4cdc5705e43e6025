//! Resource registration and dispatch.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ReadResourceResult, ResourceDefinition};

use super::{console, screenshot};

pub struct ResourceRegistry;

impl ResourceRegistry {
    pub async fn list_resources(
        session: &Arc<Mutex<BrowserSessionManager>>,
    ) -> Vec<ResourceDefinition> {
        let session = session.lock().await;

        let mut resources = vec![ResourceDefinition {
            uri: "console://logs".to_string(),
            name: "Browser console logs".to_string(),
            description: Some("Console output captured by evaluate calls".to_string()),
            mime_type: Some("text/plain".to_string()),
        }];

        for name in session.screenshot_names() {
            resources.push(ResourceDefinition {
                uri: format!("screenshot://{name}"),
                name: format!("Screenshot: {name}"),
                description: None,
                mime_type: Some("image/png".to_string()),
            });
        }

        resources
    }

    pub async fn read(
        uri: &str,
        session: &Arc<Mutex<BrowserSessionManager>>,
    ) -> McpResult<ReadResourceResult> {
        if uri == "console://logs" {
            console::read_logs(session).await
        } else if let Some(name) = uri.strip_prefix("screenshot://") {
            screenshot::read_screenshot(name, session).await
        } else {
            Err(McpError::ResourceNotFound(uri.to_string()))
        }
    }
}
