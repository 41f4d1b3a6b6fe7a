// errors.rs
use std::fmt;

/// Errors originating from the tracker itself (bad input) or from the
/// key-value store underneath it.
#[derive(Debug)]
pub enum TrackerError {
    BadRequest(String),
    DbError(String),
    Serde(String),
    InternalError,
}

// Type alias used by store and session code.
pub type TrackerResult<T> = Result<T, TrackerError>;

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            TrackerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            TrackerError::Serde(msg) => write!(f, "Serialization Error: {msg}"),
            TrackerError::InternalError => write!(f, "Internal Error"),
        }
    }
}

impl std::error::Error for TrackerError {}

impl From<rusqlite::Error> for TrackerError {
    fn from(e: rusqlite::Error) -> Self {
        TrackerError::DbError(e.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::Serde(e.to_string())
    }
}
