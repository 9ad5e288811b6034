//! Error classification
//!
//! One [`ErrorKind`] per failure class the API reports. Each class owns a
//! fixed HTTP status and reason phrase.

use std::fmt;

/// 失敗の分類
///
/// | kind | status | class |
/// |------|--------|-------|
/// | `BadRequest` | 400 | 入力の欠落・形式不正 |
/// | `Unauthorized` | 401 | 資格情報またはトークンが無効 |
/// | `Forbidden` | 403 | トークンは有効だがロールが一致しない |
/// | `NotFound` | 404 | ルートまたはプリンシパルが存在しない |
/// | `MethodNotAllowed` | 405 | ルートはあるがメソッドが違う |
/// | `RequestTimeout` | 408 | リクエストが制限時間を超えた |
/// | `Conflict` | 409 | 一意な識別子・出欠日の重複 |
/// | `InternalServerError` | 500 | 想定外の失敗 |
/// | `ServiceUnavailable` | 503 | データベースが応答しない |
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert_eq!(ErrorKind::Forbidden.to_string(), "Forbidden");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    RequestTimeout,
    Conflict,
    InternalServerError,
    ServiceUnavailable,
}

impl ErrorKind {
    const fn status_and_reason(self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::MethodNotAllowed => (405, "Method Not Allowed"),
            ErrorKind::RequestTimeout => (408, "Request Timeout"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    pub const fn status_code(&self) -> u16 {
        self.status_and_reason().0
    }

    /// Reason phrase, also the generic message for masked 5xx responses
    pub const fn as_str(&self) -> &'static str {
        self.status_and_reason().1
    }

    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::NotFound, 404),
            (ErrorKind::MethodNotAllowed, 405),
            (ErrorKind::RequestTimeout, 408),
            (ErrorKind::Conflict, 409),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::ServiceUnavailable, 503),
        ];
        for (kind, status) in expected {
            assert_eq!(kind.status_code(), status, "{kind}");
        }
    }

    #[test]
    fn test_error_classes() {
        assert!(ErrorKind::Conflict.is_client_error());
        assert!(!ErrorKind::Conflict.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert!(!ErrorKind::InternalServerError.is_client_error());
    }

    #[test]
    fn test_reason_phrase() {
        assert_eq!(ErrorKind::InternalServerError.as_str(), "Internal Server Error");
        assert_eq!(ErrorKind::NotFound.to_string(), "Not Found");
    }
}
