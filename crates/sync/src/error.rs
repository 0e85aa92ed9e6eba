use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that abort a sync run.
///
/// Failures of single remote deletes or uploads never show up here; they are
/// reported per item in [`SyncReport`](crate::SyncReport).
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("malformed remote payload: {0}")]
    Payload(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
