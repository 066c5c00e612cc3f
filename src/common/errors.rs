//! Error types for the application

use thiserror::Error;

/// Result type alias using our ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Main error type for probe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Target host/port unreachable or refusing connections
    #[error("Connection failed: {0}")]
    Connection(String),

    /// No response within the configured bound
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// HTTP request errors that are neither connect nor timeout failures
    #[error("HTTP request error: {0}")]
    HttpRequest(reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Console or file I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        // A connect timeout reports both flags; it counts as a timeout.
        if err.is_timeout() {
            ProbeError::Timeout(err.to_string())
        } else if err.is_connect() {
            ProbeError::Connection(err.to_string())
        } else {
            ProbeError::HttpRequest(err)
        }
    }
}

/// The three failure categories a run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Timeout,
    Other,
}

impl FailureKind {
    /// Console label printed ahead of the underlying cause
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Connection => "Connection Error",
            FailureKind::Timeout => "Timeout Error",
            FailureKind::Other => "Error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl ProbeError {
    /// Classify this error into the category reported on the console
    pub fn kind(&self) -> FailureKind {
        match self {
            ProbeError::Connection(_) => FailureKind::Connection,
            ProbeError::Timeout(_) => FailureKind::Timeout,
            _ => FailureKind::Other,
        }
    }

    /// The underlying cause without the variant prefix
    pub fn cause(&self) -> String {
        match self {
            ProbeError::Connection(msg)
            | ProbeError::Timeout(msg)
            | ProbeError::InvalidResponse(msg)
            | ProbeError::Configuration(msg)
            | ProbeError::Internal(msg) => msg.clone(),
            ProbeError::HttpRequest(err) => err.to_string(),
            ProbeError::JsonParse(err) => err.to_string(),
            ProbeError::Io(err) => err.to_string(),
        }
    }
}
