use std::fmt;

use thiserror::Error;

/// The request never produced a usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    InvalidUrl,
    Network,
    Timeout,
    /// Body was not the expected JSON document.
    Decode,
    /// Only raised for artifact downloads; action endpoints report failures in JSON.
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The engine went away before the request resolved.
    Disconnected,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::InvalidUrl => write!(f, "invalid url"),
            TransportErrorKind::Network => write!(f, "network error"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Decode => write!(f, "malformed response body"),
            TransportErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "artifact too large (max {max_bytes}, actual {actual:?})")
            }
            TransportErrorKind::Disconnected => write!(f, "engine disconnected"),
        }
    }
}

/// Why a workflow ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("service error: {}", .message.as_deref().unwrap_or("no detail"))]
    Service { message: Option<String> },
}
