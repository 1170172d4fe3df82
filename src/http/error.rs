//! Request facade error definitions.

use thiserror::Error;

/// Failures delivered to request callbacks.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Connection refused, DNS failure, reset, or a body read error.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Parameters could not be turned into form pairs.
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A configured header value is not valid on the wire.
    #[error("Invalid header value for {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl RequestError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for facade calls.
pub type RequestResult<T> = Result<T, RequestError>;
