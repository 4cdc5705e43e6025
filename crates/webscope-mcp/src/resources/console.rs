//! Resource: console://logs

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::BrowserSessionManager;
use crate::types::{McpResult, ReadResourceResult, ResourceContent};

pub async fn read_logs(
    session: &Arc<Mutex<BrowserSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let text = session.console_logs().join("\n");

    Ok(ReadResourceResult {
        contents: vec![ResourceContent {
            uri: "console://logs".to_string(),
            mime_type: Some("text/plain".to_string()),
            text: Some(text),
            blob: None,
        }],
    })
}
