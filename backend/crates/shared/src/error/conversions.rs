//! Conversions into [`AppError`] and its HTTP rendering
//!
//! Database errors and JSON body rejections become envelope errors here;
//! the store crates add their own constraint-specific mapping on top.

use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL unique_violation
pub const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign_key_violation
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Unique constraint hit
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(PG_UNIQUE_VIOLATION)
}

/// Referenced row missing
#[cfg(feature = "sqlx")]
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(PG_FOREIGN_KEY_VIOLATION)
}

#[cfg(feature = "sqlx")]
fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some(PG_UNIQUE_VIOLATION) => AppError::conflict("Duplicate key value"),
                    Some(PG_FOREIGN_KEY_VIOLATION) => AppError::conflict("Foreign key violation"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request("Invalid request body").with_error(rejection.body_text())
    }
}

#[cfg(feature = "axum")]
impl AppError {
    /// JSON body of the error envelope
    ///
    /// In production a 5xx message is replaced by the generic kind text and
    /// `detail` is left out.
    pub fn to_envelope(&self) -> serde_json::Value {
        let expose = super::reporting::expose_details();

        let message = if self.is_server_error() && !expose {
            self.kind().as_str().to_string()
        } else {
            self.message().to_string()
        };

        let mut body = serde_json::json!({
            "success": false,
            "message": message,
            "errors": self.errors(),
        });

        if let Some(action) = self.action() {
            body["action"] = serde_json::Value::from(action);
        }
        if expose {
            if let Some(detail) = self.source_chain() {
                body["detail"] = serde_json::Value::from(detail);
            }
        }

        body
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        if self.is_server_error() {
            tracing::error!(
                kind = %self.kind(),
                message = %self.message(),
                source = ?self.source_chain(),
                "Request failed with server error"
            );
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_envelope())).into_response()
    }
}
