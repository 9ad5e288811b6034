//! Attendance Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::attendance_date::AttendanceDate;

pub type AttendanceResult<T> = Result<T, AttendanceError>;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("{0}")]
    Validation(AppError),

    /// Records are immutable; a date can be marked once
    #[error("Attendance for {date} has already been marked")]
    AlreadyMarked { date: AttendanceDate },

    /// The owner vanished between token issue and insert
    #[error("Principal not found")]
    OwnerNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AttendanceError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AttendanceError::Validation(e) => e.kind(),
            AttendanceError::AlreadyMarked { .. } => ErrorKind::Conflict,
            AttendanceError::OwnerNotFound => ErrorKind::NotFound,
            AttendanceError::Database(_) | AttendanceError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            AttendanceError::Validation(e) => e,
            AttendanceError::AlreadyMarked { .. } => {
                AppError::conflict(self.to_string()).with_error("date")
            }
            AttendanceError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AttendanceError::Database(e) => {
                tracing::error!(error = %e, "Attendance database error");
            }
            AttendanceError::Internal(msg) => {
                tracing::error!(message = %msg, "Attendance internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Attendance error");
            }
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AttendanceError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AttendanceError::Validation(err)
        } else {
            AttendanceError::Internal(err.to_string())
        }
    }
}
