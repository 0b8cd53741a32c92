/// Error types for network-facing collaborators
use thiserror::Error;

/// Result type alias using `FetchError`
pub type Result<T> = std::result::Result<T, FetchError>;

/// Failure while retrieving the catalog or a track's audio bytes
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failed before a response arrived (connect, timeout, body read)
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Server answered with a status outside the success range
    #[error("Server rejected request ({status}): {message}")]
    ServerRejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Response arrived but could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Local resource could not be materialized
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`FetchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Nothing usable came back over the wire
    NetworkFailure,
    /// The server refused the request
    ServerRejected,
}

impl FetchError {
    /// Create a network failure
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkFailure(msg.into())
    }

    /// Create a server rejection
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::ServerRejected {
            status,
            message: message.into(),
        }
    }

    /// Classify the error.
    ///
    /// Only an explicit non-success status counts as a rejection; anything
    /// that prevented a usable body from arriving is a network failure.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::ServerRejected { .. } => FetchErrorKind::ServerRejected,
            Self::NetworkFailure(_) | Self::InvalidResponse(_) | Self::Io(_) => {
                FetchErrorKind::NetworkFailure
            }
        }
    }
}
