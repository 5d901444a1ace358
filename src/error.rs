//! Error types shared across the search engine

use thiserror::Error;

/// Failure of a single backend fetch.
///
/// Never propagated out of the typing/scrolling paths: the controller logs it
/// and settles into an empty (or partial) result state.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend reported an unsuccessful response")]
    Unsuccessful,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Durable storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Rejected explicit search action
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("search text is blank")]
    Blank,
}
