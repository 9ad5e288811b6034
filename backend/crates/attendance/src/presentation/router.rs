//! Attendance Router

use std::sync::Arc;

use auth::{AuthGate, TokenService, authorize};
use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::domain::repository::AttendanceRepository;
use crate::presentation::handlers::{self, AttendanceAppState};

/// `GET|POST /` for any authenticated principal; nest it at `/attendance`
pub fn attendance_router<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: AttendanceRepository + Clone + Send + Sync + 'static,
{
    let state = AttendanceAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list::<R>).post(handlers::mark::<R>),
        )
        .route_layer(from_fn_with_state(AuthGate::authenticated(tokens), authorize))
        .with_state(state)
}
