//! Error types and JSON-RPC error codes for the MCP server.

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP-specific error codes.
pub mod mcp_error_codes {
    pub const REQUEST_CANCELLED: i32 = -32800;
    pub const RESOURCE_NOT_FOUND: i32 = -32802;
    pub const TOOL_NOT_FOUND: i32 = -32803;
    pub const ELEMENT_NOT_FOUND: i32 = -32850;
    pub const ACTION_FAILED: i32 = -32851;
    pub const AUDIT_FAILED: i32 = -32852;
    pub const BROWSER_ERROR: i32 = -32853;

    /// Server: Unauthorized (missing or invalid bearer token).
    pub const UNAUTHORIZED: i32 = -32900;
}

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Request cancelled")]
    RequestCancelled,

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Audit failed: {0}")]
    AuditFailed(String),

    #[error("Browser error: {0}")]
    BrowserError(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unauthorized — missing or invalid bearer token.
    #[error("Unauthorized")]
    Unauthorized,
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) => INTERNAL_ERROR,
            McpError::RequestCancelled => REQUEST_CANCELLED,
            McpError::ResourceNotFound(_) => RESOURCE_NOT_FOUND,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::ElementNotFound(_) => ELEMENT_NOT_FOUND,
            McpError::ActionFailed(_) => ACTION_FAILED,
            McpError::AuditFailed(_) => AUDIT_FAILED,
            McpError::BrowserError(_) => BROWSER_ERROR,
            McpError::Transport(_) | McpError::Io(_) => INTERNAL_ERROR,
            McpError::Json(_) => PARSE_ERROR,
            McpError::Unauthorized => UNAUTHORIZED,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<webscope::WebError> for McpError {
    fn from(e: webscope::WebError) -> Self {
        match e {
            webscope::WebError::Launch(msg) => McpError::BrowserError(msg),
            webscope::WebError::ElementNotFound(msg) => McpError::ElementNotFound(msg),
            webscope::WebError::Action(msg) => McpError::ActionFailed(msg),
            webscope::WebError::Audit(msg) => McpError::AuditFailed(msg),
            webscope::WebError::Io(e) => McpError::Io(e),
            webscope::WebError::Json(e) => McpError::Json(e),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_their_codes() {
        let not_found: McpError =
            webscope::WebError::ElementNotFound("no element matches selector '#x'".into()).into();
        assert_eq!(not_found.code(), mcp_error_codes::ELEMENT_NOT_FOUND);

        let failed: McpError = webscope::WebError::Action("click failed".into()).into();
        assert_eq!(failed.code(), mcp_error_codes::ACTION_FAILED);

        let audit: McpError = webscope::WebError::Audit("no report".into()).into();
        assert_eq!(audit.code(), mcp_error_codes::AUDIT_FAILED);
    }

    #[test]
    fn error_responses_carry_the_request_id() {
        let err = McpError::ToolNotFound("bogus".into());
        let rpc = err.to_json_rpc_error(RequestId::Number(9));
        assert_eq!(rpc.id, RequestId::Number(9));
        assert_eq!(rpc.error.code, mcp_error_codes::TOOL_NOT_FOUND);
        assert!(rpc.error.message.contains("bogus"));
    }
}
