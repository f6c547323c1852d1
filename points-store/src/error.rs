//! Store error types

use thiserror::Error;

/// Receipt store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record under the requested key
    #[error("Receipt not found: {0}")]
    NotFound(String),

    /// Backend could not be reached or failed the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Store configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sled::Error> for StoreError {
    fn from(e: sled::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
