//! Error taxonomy for the dispatch path.
//!
//! Every variant is handled inside the dispatcher and turned into a
//! response; nothing here escapes `Dispatcher::dispatch`.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type returned by resources.
pub type HandlerResult = Result<(), DispatchError>;

/// Failure raised while resolving or running a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No registered pattern matches the path.
    #[error("no route matches {path}")]
    NotFound { path: String },

    /// A route matched but its resource has no operation for the verb.
    #[error("method {method} not allowed")]
    MethodNotAllowed { method: String },

    /// The request body exceeded the configured limit.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// A resource or middleware panicked.
    #[error("handler panicked: {message}")]
    Panicked { message: String },

    /// An error status chosen by the resource itself.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Build an error carrying an explicit status code.
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        DispatchError::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status written to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::NotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            DispatchError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            DispatchError::Panicked { .. } | DispatchError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DispatchError::Status { status, .. } => *status,
        }
    }

    /// Body text safe to show the client.
    ///
    /// Panic payloads stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            DispatchError::Panicked { .. } | DispatchError::Internal(_) => {
                "Internal server error".to_string()
            }
            DispatchError::NotFound { .. } => "No matching route found".to_string(),
            other => other.to_string(),
        }
    }
}
