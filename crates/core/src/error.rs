//! Unified error types for c2pa-docs.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the c2pa-docs server.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Fetch target host is outside the fixed allow-list.
    #[error("BLOCKED_HOST: {0}")]
    BlockedHost(String),

    /// Non-retryable HTTP status, or a retryable status after the retry budget.
    #[error("HTTP_STATUS: {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Network-layer failure after the retry budget.
    #[error("TRANSPORT: {0}")]
    Transport(String),

    /// Repository key is not one of the known logical repositories.
    #[error("UNKNOWN_REPO: {0}")]
    UnknownRepo(String),

    /// Library name is not one of the known documentation targets.
    #[error("UNKNOWN_LIBRARY: {0}")]
    UnknownLibrary(String),

    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::BlockedHost(_) => -32004,
            Error::HttpStatus { .. } => -32008,
            Error::Transport(_) => -32006,
            Error::UnknownRepo(_) => -32001,
            Error::UnknownLibrary(_) => -32002,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}

/// Replace every occurrence of a configured secret in a message with `***`.
///
/// Used at the tool boundary so a configured access credential never appears
/// verbatim in a rendered error message.
pub fn redact_secret(message: &str, secret: Option<&str>) -> String {
    match secret {
        Some(s) if !s.is_empty() => message.replace(s, "***"),
        _ => message.to_string(),
    }
}
