//! Common error types for WorkflowCRM

use thiserror::Error;

/// Common result type for WorkflowCRM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across WorkflowCRM crates
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error talking to the hosted backend (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error response from the hosted backend (PostgREST / GoTrue)
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Authentication failure; message is shown inline on the form
    #[error("Authentication error: {0}")]
    Auth(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the backend rejected the request as unauthorized,
    /// meaning the user session should be invalidated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Backend { status: 401, .. } | Error::Auth(_))
    }
}
