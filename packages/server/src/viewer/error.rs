use pdfview_common::StorageError;
use thiserror::Error;

/// Failure of a viewer action, split so callers can tell "fix your input"
/// from "try again later".
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl ViewerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<StorageError> for ViewerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => Self::NotFound(format!("PDF '{name}' not found")),
            StorageError::InvalidName(_) => Self::Validation("invalid filename".into()),
            other => Self::Storage(other),
        }
    }
}
