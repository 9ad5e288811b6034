//! The error every endpoint ultimately answers with
//!
//! Crate-level errors (`AuthError`, `AttendanceError`) convert into
//! [`AppError`], which renders as `{success: false, message, errors}`.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Text = Cow<'static, str>;

/// Envelope-ready error
///
/// `errors` carries field names or short per-field notes; `action` is an
/// optional hint for the client. `source` is logged and only ever shown to
/// clients outside production.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::missing_fields(&["email", "password"]);
/// assert_eq!(err.kind(), ErrorKind::BadRequest);
/// assert_eq!(err.message(), "Missing required fields: email, password");
/// assert_eq!(err.errors().len(), 2);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Text,
    errors: Vec<Text>,
    action: Option<Text>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Text>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: Vec::new(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn service_unavailable(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// 400 listing every absent request field, in the order given
    pub fn missing_fields(fields: &[&'static str]) -> Self {
        let message = format!("Missing required fields: {}", fields.join(", "));
        fields
            .iter()
            .fold(Self::bad_request(message), |err, field| err.with_error(*field))
    }

    pub fn with_error(mut self, error: impl Into<Text>) -> Self {
        self.errors.push(error.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<Text>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[Text] {
        &self.errors
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }

    /// Flattened `source` chain, outermost first
    pub fn source_chain(&self) -> Option<String> {
        let parts: Vec<String> =
            std::iter::successors(self.source(), |&err| err.source())
                .map(ToString::to_string)
                .collect();
        (!parts.is_empty()).then(|| parts.join(": "))
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("errors", &self.errors)
            .field("action", &self.action)
            .field("source", &self.source_chain())
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_to_status() {
        let cases = [
            (AppError::bad_request("x"), 400),
            (AppError::unauthorized("x"), 401),
            (AppError::forbidden("x"), 403),
            (AppError::not_found("x"), 404),
            (AppError::conflict("x"), 409),
            (AppError::internal("x"), 500),
            (AppError::service_unavailable("x"), 503),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn test_missing_fields_lists_each_field() {
        let err = AppError::missing_fields(&["date", "status"]);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Missing required fields: date, status");
        assert_eq!(err.errors(), ["date", "status"]);
        assert!(err.action().is_none());
    }

    #[test]
    fn test_source_chain() {
        let io_err = std::io::Error::other("disk on fire");
        let err = AppError::internal("Failed to persist").with_source(io_err);
        assert_eq!(err.source_chain().as_deref(), Some("disk on fire"));
        assert!(AppError::internal("bare").source_chain().is_none());
    }

    #[derive(Debug)]
    struct QueryFailed(std::io::Error);

    impl fmt::Display for QueryFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("query failed")
        }
    }

    impl Error for QueryFailed {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_source_chain_walks_nested_sources() {
        let err = AppError::internal("Failed to load principal")
            .with_source(QueryFailed(std::io::Error::other("connection reset")));
        assert_eq!(
            err.source_chain().as_deref(),
            Some("query failed: connection reset")
        );
    }

    #[test]
    fn test_display_omits_details() {
        let err = AppError::conflict("Email already registered")
            .with_error("email")
            .with_action("Log in instead");
        assert_eq!(err.to_string(), "[Conflict] Email already registered");
        assert_eq!(err.action(), Some("Log in instead"));
    }
}
