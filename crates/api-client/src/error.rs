use std::path::PathBuf;
use thiserror::Error;

/// Generic message for an error status whose body carries no explanation.
pub const REQUEST_FAILED: &str = "请求失败";
/// Generic message for a transport failure with no usable description.
pub const NETWORK_FAILED: &str = "网络请求失败";

/// Failures inside the HTTP wrapper.
///
/// These never leave [`crate::ApiClient::request`]; they are folded into a
/// failed [`crate::ResultEnvelope`] via [`ApiError::user_message`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The API request returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The best available description for the user: the server's own
    /// message first, then the transport's, then a generic string.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { message: None, .. } => REQUEST_FAILED.to_string(),
            ApiError::Transport(e) => {
                let description = e.to_string();
                if description.trim().is_empty() {
                    NETWORK_FAILED.to_string()
                } else {
                    description
                }
            }
            ApiError::Deserialization(description) if !description.trim().is_empty() => {
                description.clone()
            }
            ApiError::Deserialization(_) => NETWORK_FAILED.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file '{path}' is corrupted: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize the session file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Session store lock was poisoned")]
    Poisoned,
}
