//! Webscope MCP Server — browser automation and Lighthouse audits for LLM clients.

pub mod config;
pub mod protocol;
pub mod repl;
pub mod resources;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_chrome_path, resolve_report_dir};
pub use protocol::ProtocolHandler;
pub use session::BrowserSessionManager;
pub use transport::StdioTransport;
