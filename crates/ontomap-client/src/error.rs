//! Error types for the service clients

use thiserror::Error;

/// Errors that can occur while talking to a knowledge service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Connection, timeout or other transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Service answered with a status the client does not accept
    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Body did not decode into the expected record shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Failure injected by a mock service
    #[error("Mock failure: {0}")]
    Mock(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::MalformedResponse(err.to_string())
        } else {
            ClientError::Communication(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}
