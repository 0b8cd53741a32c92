//! Error types for the Cadence server client.

use cadence_core::FetchError;
use thiserror::Error;

/// Errors that can occur when talking to the music server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// IO error while materializing a download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ServerClientError {
    /// Classify a transport error from `reqwest`
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

impl From<ServerClientError> for FetchError {
    fn from(e: ServerClientError) -> Self {
        match e {
            ServerClientError::ServerError { status, message } => {
                FetchError::ServerRejected { status, message }
            }
            ServerClientError::ParseError(msg) => FetchError::InvalidResponse(msg),
            ServerClientError::Io(e) => FetchError::Io(e),
            ServerClientError::Request(e) => FetchError::NetworkFailure(e.to_string()),
            ServerClientError::ServerUnreachable(msg) | ServerClientError::InvalidUrl(msg) => {
                FetchError::NetworkFailure(msg)
            }
        }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
