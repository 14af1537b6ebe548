//! Client Error Types

use kernel::error::kind::ErrorKind;
use serde_json::Value;
use thiserror::Error;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server refused the operation (403). Never retried.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Login was rejected, or could not be performed
    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Network-level failure, message passed through verbatim
    #[error("{0}")]
    Transport(String),

    /// Any other non-200 response
    #[error("{message}")]
    Request { status: u16, message: String },

    /// A 200 response whose body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a non-200 response.
    ///
    /// The message is the server's `error` field when there is one.
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        let message = server_message(status, body);

        match status {
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            _ => ClientError::Request { status, message },
        }
    }

    /// HTTP status behind this error, if it came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-side error kind for response errors
    pub fn kind(&self) -> Option<ErrorKind> {
        self.status_code().map(ErrorKind::from_status_code)
    }
}

pub(crate) fn server_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|b| b.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request Failed.\n Status Code: {}", status))
}
