// ABOUTME: Error types for the batch execution engine and the operations built on it
// ABOUTME: Covers provider validation, executor construction, backend failures and task joins

use thiserror::Error;

use crate::backend::BackendError;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("{provider} not implemented")]
    UnsupportedProvider { provider: String },

    #[error("Invalid reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Executor capacity must be at least 1, got {capacity}")]
    InvalidCapacity { capacity: usize },

    #[error("Executor permits are no longer available")]
    ExecutorClosed,

    #[error("Task panicked while processing {subject}")]
    TaskPanicked { subject: String },

    #[error("Failed to create {provider} client: {message}")]
    Client { provider: String, message: String },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SweepError>;
