//! Image storage errors.

use thiserror::Error;

/// Errors that can occur when talking to the storage backend.
#[derive(Debug, Error)]
pub enum ImageStorageError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response.
    #[error("unexpected response from storage: {0}")]
    UnexpectedResponse(String),
}
