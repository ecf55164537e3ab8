//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use reviewbot_core::DomainError;
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("Invalid request: {}", message)]
    BadRequest { message: String },

    #[error(transparent)]
    DomainError {
        #[from]
        source: DomainError,
    },
}

impl ServerError {
    /// Machine-readable code sent in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError { .. } => "INTERNAL",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::DomainError { source } => source.code(),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::IoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::DomainError { source } => match source {
                DomainError::PullRequestAlreadyExists { .. } | DomainError::Conflict(_) => {
                    StatusCode::CONFLICT
                }
                DomainError::TeamAlreadyExists { .. } => StatusCode::BAD_REQUEST,
                DomainError::AuthorNotFound { .. }
                | DomainError::UserNotFound { .. }
                | DomainError::TeamNotFound { .. }
                | DomainError::PullRequestNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T, E = ServerError> = core::result::Result<T, E>;
