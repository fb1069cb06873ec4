//! Error types for the progress server.

use thiserror::Error;

/// Result type alias for progress server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the progress server.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Progress Registry Errors =====
    #[error("Progress token \"{0}\" already exists")]
    ProgressAlreadyExists(String),

    #[error("Progress token \"{0}\" not found")]
    ProgressNotFound(String),

    // ===== MCP Errors =====
    #[error("MCP protocol error: {0}")]
    McpProtocol(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidToolArguments(String),

    // ===== Notification Errors =====
    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Notifications are not supported on {0}")]
    UnsupportedPlatform(String),

    // ===== I/O Errors =====
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== HTTP Errors =====
    #[error("HTTP server error: {0}")]
    HttpServer(String),

    // ===== Internal Errors =====
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// JSON-RPC error code used when this error escapes a request.
    pub fn jsonrpc_code(&self) -> i32 {
        use crate::mcp::protocol::error_codes;

        match self {
            Self::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            Self::InvalidToolArguments(_) => error_codes::INVALID_PARAMS,
            Self::McpProtocol(_) => error_codes::INVALID_REQUEST,
            _ => error_codes::INTERNAL_ERROR,
        }
    }
}
