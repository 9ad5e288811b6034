//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::principal_role::PrincipalRole;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input; carries the user-facing detail
    #[error("{0}")]
    Validation(AppError),

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("A student with this enrollment number already exists")]
    EnrollmentNumberTaken,

    #[error("A faculty member with this faculty ID already exists")]
    FacultyIdTaken,

    /// Unknown identifier, wrong password or wrong admin designation.
    /// One message for all of them so accounts cannot be enumerated.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token on a protected route
    #[error("Authentication required")]
    Unauthenticated,

    /// Bad signature, expired, malformed or revoked token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Valid token, wrong role
    #[error("Access denied: {required} role required")]
    Forbidden { required: PrincipalRole },

    #[error("Principal not found")]
    PrincipalNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(e) => e.kind(),
            AuthError::EmailTaken
            | AuthError::EnrollmentNumberTaken
            | AuthError::FacultyIdTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Forbidden { .. } => ErrorKind::Forbidden,
            AuthError::PrincipalNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(e) => e,
            AuthError::EmailTaken => AppError::conflict(self.to_string()).with_error("email"),
            AuthError::EnrollmentNumberTaken => {
                AppError::conflict(self.to_string()).with_error("enrollmentNumber")
            }
            AuthError::FacultyIdTaken => {
                AppError::conflict(self.to_string()).with_error("facultyId")
            }
            // Pool exhaustion etc. keep their own classification
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected invalid session token");
            }
            AuthError::Forbidden { required } => {
                tracing::warn!(required = %required, "Role check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err)
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {}", err))
    }
}
