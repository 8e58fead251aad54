use api_client::{ApiError, TokenStoreError};
use thiserror::Error;

/// Failures inside a page handler.
///
/// Handlers never return these to their caller; each page converts them
/// into the same inline error or alert it uses for a `success: false`
/// result.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Unexpected response from the backend: {0}")]
    Response(#[from] ApiError),

    #[error("Session storage failed: {0}")]
    Session(#[from] TokenStoreError),

    #[error("{0}")]
    MissingData(String),
}
