//! Error types for the network crate.

use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur while talking to the node.
#[derive(Debug)]
pub enum NetworkError {
    /// Error when the HTTP request cannot be sent or read.
    HttpError(String),

    /// Error when the node does not answer in time.
    Timeout(String),

    /// Error when the node answers with an error object.
    NodeRequestFailed(String),

    /// Error when the node's answer cannot be interpreted.
    InvalidResponse(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            NetworkError::Timeout(msg) => write!(f, "Timeout waiting for {}", msg),
            NetworkError::NodeRequestFailed(msg) => write!(f, "Node request failed: {}", msg),
            NetworkError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl StdError for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            NetworkError::Timeout(error.to_string())
        } else {
            NetworkError::HttpError(error.to_string())
        }
    }
}
