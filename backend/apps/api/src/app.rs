//! Router assembly
//!
//! Everything is mounted under `/api`; unknown paths fall through to a 404
//! envelope. Bare 405 and 408 responses produced by routing and the timeout
//! layer are rewritten into the same envelope.

use std::sync::Arc;

use attendance::{attendance_router, domain::AttendanceRepository};
use auth::{AuthConfig, TokenService, auth_router, domain::PrincipalRepository};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
};
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use kernel::response::ApiResponse;
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;

/// Build the full application router
pub fn build_router<P, A>(
    principals: P,
    attendance: A,
    auth_config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
    http: &HttpConfig,
) -> Router
where
    P: PrincipalRepository + Clone + Send + Sync + 'static,
    A: AttendanceRepository + Clone + Send + Sync + 'static,
{
    let api = auth_router(principals, auth_config, tokens.clone())
        .nest("/attendance", attendance_router(attendance, tokens))
        .route("/health", get(health));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            http.request_timeout,
        ))
        .layer(map_response(envelope_bare_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&http.frontend_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(auth::presentation::AUTH_TOKEN_HEADER),
        ]))
        .allow_credentials(true)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// GET /api/health
async fn health() -> ApiResponse<Health> {
    ApiResponse::ok("Service is healthy", Health { status: "ok" })
}

async fn not_found() -> impl IntoResponse {
    AppError::not_found("Route not found")
}

/// Wrap body-less 405/408 responses in the error envelope, keeping `Allow`
async fn envelope_bare_errors(response: Response) -> Response {
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let err = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            AppError::new(ErrorKind::MethodNotAllowed, "Method not allowed")
        }
        StatusCode::REQUEST_TIMEOUT => AppError::new(ErrorKind::RequestTimeout, "Request timed out"),
        _ => return response,
    };

    let mut enveloped = err.into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        enveloped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    enveloped
}
