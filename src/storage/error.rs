use thiserror::Error;

/// Failures from the durable key-value medium.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(String),
    #[error("could not encode cart snapshot: {0}")]
    Encode(String),
    #[error("storage write rejected: {0}")]
    Write(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Encode(e.to_string())
    }
}
