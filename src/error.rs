//! Error types for the Readwise MCP server

use thiserror::Error;

/// Result type alias for Readwise operations
pub type Result<T> = std::result::Result<T, ReadwiseError>;

/// Main error type for the Readwise adapter
///
/// Failures are never retried: a transport or API error aborts the whole
/// operation, including any pagination loop in flight.
#[derive(Error, Debug)]
pub enum ReadwiseError {
    /// Network-level failure: DNS, connection, TLS, or request timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the Readwise API
    #[error("Readwise API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Pagination safety guard tripped on a remote that never stops paging
    #[error("pagination exhausted safety limit after {0} pages")]
    PageLimit(u32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadwiseError {
    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            ReadwiseError::Api { status: 404, .. } => -32001,
            ReadwiseError::Api { status: 401, .. } | ReadwiseError::Api { status: 403, .. } => {
                -32003
            }
            ReadwiseError::Api { status: 429, .. } => -32004,
            ReadwiseError::Serialization(_) => -32602,
            _ => -32000,
        }
    }
}
