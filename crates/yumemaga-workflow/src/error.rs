//! Error types for workflow operations.

use thiserror::Error;

/// Errors surfaced to the caller of a single user action.
///
/// None of these are retried automatically.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Scope, unit, or checklist item not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Completion requested for a unit that is already completed.
    #[error("already completed: {0}")]
    AlreadyCompleted(String),

    /// The backing store answered with `success: false`.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// The request did not reach the backend or the reply was unreadable.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed backend URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        WorkflowError::Transport(err.to_string())
    }
}

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
