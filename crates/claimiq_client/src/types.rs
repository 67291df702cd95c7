use thiserror::Error;

pub type QueryId = u64;

/// Server acknowledgement of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub file_id: String,
    pub file_name: String,
}

/// Answer to a query. `thinking` always carries text: when the server omits
/// it, the client substitutes a fixed fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub response: String,
    pub thinking: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// Transport-level failure before a response arrived.
    #[error("network error")]
    Network,
    #[error("timeout")]
    Timeout,
    /// The server answered with a non-success HTTP status; the error message
    /// carries the full status line.
    #[error("http status {0}")]
    HttpStatus(u16),
    /// A 2xx response whose embedded status field signalled failure.
    #[error("server reported failure")]
    ServerLogic,
    /// The selected file could not be read before upload.
    #[error("file read error")]
    Io,
}
