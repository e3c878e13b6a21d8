// ABOUTME: Error types for backend client operations
// ABOUTME: Distinguishes missing objects and bad paths from other object store failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Object not found: {path}")]
    NotFound { path: String },

    #[error("Invalid object path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Object store error for {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: object_store::Error,
    },
}

impl BackendError {
    pub(crate) fn from_store(path: &str, source: object_store::Error) -> Self {
        match source {
            object_store::Error::NotFound { .. } => BackendError::NotFound {
                path: path.to_string(),
            },
            source => BackendError::Store {
                path: path.to_string(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
