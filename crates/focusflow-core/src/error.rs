//! Core error types for focusflow-core.
//!
//! The error surface is deliberately narrow: command validation failures are
//! returned to the caller with no partial effect, storage read anomalies
//! degrade to defaults, and stale timer ticks are absorbed silently. Nothing
//! in the timer path is fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Command input was rejected before mutating any state
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
///
/// Raised by collection commands before any mutation; the collection is
/// untouched whenever one of these is returned.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task name must be non-empty
    #[error("Task name must not be empty")]
    EmptyName,

    /// Invalid numeric input
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Command referenced a task id that is not in the collection
    #[error("No task with id '{0}'")]
    UnknownTask(String),

    /// Timers cannot be started on a completed task
    #[error("Task '{0}' is already completed")]
    AlreadyCompleted(String),

    /// Pomodoro tasks run indefinitely and have no completable goal
    #[error("Task '{0}' is in Pomodoro mode and has no fixed goal to complete")]
    NoFixedGoal(String),

    /// Simple-mode tasks can only be completed once the goal is reached
    #[error("Task '{0}' has not reached its goal duration yet")]
    GoalNotReached(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Serializing the task collection failed
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
