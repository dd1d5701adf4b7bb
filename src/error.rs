//! Error types for the gappd-link client.

use std::fmt;

use thiserror::Error;

/// Result type for gappd-link operations.
pub type Result<T> = std::result::Result<T, GappdLinkError>;

/// Errors that can occur while talking to the Gappd API.
#[derive(Debug, Error)]
pub enum GappdLinkError {
    /// Network-level failure: DNS, connect, TLS, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status_code}): {message}")]
    Server { status_code: u16, message: String },

    /// The response body could not be parsed as the expected JSON shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The client was constructed with invalid configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A toggle for this endpoint is already outstanding.
    #[error("Mutation already in flight: {0}")]
    MutationInFlight(String),

    /// The targeted item is not present in the feed.
    #[error("Item {0} is not in the feed")]
    ItemNotFound(i64),
}

impl GappdLinkError {
    /// Create a Server error.
    pub fn server(status_code: u16, message: impl Into<String>) -> Self {
        GappdLinkError::Server {
            status_code,
            message: message.into(),
        }
    }

    /// Create a Transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        GappdLinkError::Transport(msg.into())
    }

    /// Create a Parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        GappdLinkError::Parse(msg.into())
    }

    /// HTTP status code, when the failure was a server response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GappdLinkError::Server { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GappdLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GappdLinkError::Parse(err.to_string())
        } else {
            GappdLinkError::Transport(err.to_string())
        }
    }
}

/// Clone-friendly error summary kept in feed state.
///
/// [`FeedState`](crate::store::FeedState) snapshots are cloned out to the
/// presentation layer, so the full error enum is reduced to status + message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// HTTP status when the failure was a server response.
    pub status: Option<u16>,
    /// Short user-facing message.
    pub message: String,
}

impl From<&GappdLinkError> for ErrorInfo {
    fn from(err: &GappdLinkError) -> Self {
        ErrorInfo {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
