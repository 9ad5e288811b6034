//! Request extractors
//!
//! axum 標準の `Json` は拒否時にプレーンテキストを返すため、
//! エラーエンベロープで応答するラッパーを提供します。

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};

use crate::error::app_error::AppError;

/// エンベロープ形式で拒否を返す JSON 抽出器
///
/// ```rust,ignore
/// async fn handler(AppJson(body): AppJson<LoginRequest>) -> AppResult<...> { ... }
/// ```
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: serde::Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        name: String,
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let rejection = AppJson::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(rejection.status_code(), 400);
    }

    #[tokio::test]
    async fn test_well_formed_body_is_extracted() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Jane"}"#))
            .unwrap();

        let AppJson(payload) = AppJson::<Payload>::from_request(req, &()).await.unwrap();
        assert_eq!(payload.name, "Jane");
    }
}
