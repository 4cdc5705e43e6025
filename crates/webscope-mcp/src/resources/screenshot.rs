//! Resource: screenshot://{name}

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::BrowserSessionManager;
use crate::types::{McpError, McpResult, ReadResourceResult, ResourceContent};

pub async fn read_screenshot(
    name: &str,
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let data = session
        .screenshot(name)
        .ok_or_else(|| McpError::ResourceNotFound(format!("screenshot://{name}")))?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContent {
            uri: format!("screenshot://{name}"),
            mime_type: Some("image/png".to_string()),
            text: None,
            blob: Some(data.clone()),
        }],
    })
}
