//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller lacks the privilege for this operation
    #[error("Forbidden")]
    Forbidden,

    /// Operation needs a logged-in caller
    #[error("Login required")]
    SessionRequired,

    /// Login rejected
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Product not found")]
    ProductNotFound,

    /// Unrouted path or unknown resource
    #[error("Not Found")]
    NotFound,

    #[error("Username already exists")]
    UsernameTaken,

    /// Malformed query string
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Errors already classified by the kernel (database, parsing, ...)
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Forbidden => ErrorKind::Forbidden,
            CatalogError::SessionRequired | CatalogError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            CatalogError::ProductNotFound | CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::UsernameTaken => ErrorKind::Conflict,
            CatalogError::InvalidQuery(_) => ErrorKind::BadRequest,
            CatalogError::App(err) => err.kind(),
            CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::App(err) => AppError::new(err.kind(), err.message().to_string()),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::App(err) if err.is_server_error() => {
                tracing::error!(error = ?err, "Catalog storage error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            CatalogError::Forbidden => {
                tracing::warn!("Privileged operation refused");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::App(AppError::from(err))
    }
}
