use std::sync::PoisonError;
use thiserror::Error;

/// Error type for record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store endpoint or access key was never configured
    #[error("record store is not configured")]
    NotConfigured,

    /// Configuration error
    #[error("store configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP error
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request
    #[error("store rejected the request (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The store's response could not be decoded
    #[error("failed to decode store response: {0}")]
    Decode(String),

    /// Lock error in the in-memory store
    #[error("lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(error: PoisonError<T>) -> Self {
        StoreError::Lock(error.to_string())
    }
}
