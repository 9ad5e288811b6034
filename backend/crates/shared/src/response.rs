//! Response envelope
//!
//! 成功レスポンスは `{ "success": true, "message": ..., "data": ... }` の
//! 形で返します。失敗時の形は [`crate::error::app_error::AppError`] が担当します。

use std::borrow::Cow;

use serde::Serialize;

/// 成功レスポンスのエンベロープ
///
/// `data` が `None` の場合はキーごと省略されます。
///
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::ok("Login successful", 42);
/// assert_eq!(res.status(), 200);
/// assert!(res.body().success);
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: u16,
    body: Envelope<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 OK
    pub fn ok(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::with_status(200, message, Some(data))
    }

    /// 201 Created
    pub fn created(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::with_status(201, message, Some(data))
    }

    pub fn with_status(status: u16, message: impl Into<Cow<'static, str>>, data: Option<T>) -> Self {
        Self {
            status,
            body: Envelope {
                success: true,
                message: message.into(),
                data,
            },
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Envelope<T> {
        &self.body
    }
}

impl ApiResponse<()> {
    /// データを持たない 200 OK
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_status(200, message, None)
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status)
            .unwrap_or(axum::http::StatusCode::OK);
        (status, axum::Json(self.body)).into_response()
    }
}
