//! Auth Router
//!
//! Mounts the same flows once per variant:
//! `/{admin,faculty,student}/{register,login,reset-password,logout,me}`.

use axum::{
    Extension, Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::principal_role::PrincipalRole;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, authorize};

/// Create the Auth router for any repository implementation
pub fn auth_router<R>(repo: R, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Router
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        tokens,
    };

    PrincipalRole::ALL
        .into_iter()
        .fold(Router::new(), |router, role| {
            router.nest(&format!("/{}", role.code()), variant_router(role, state.clone()))
        })
}

fn variant_router<R>(role: PrincipalRole, state: AuthAppState<R>) -> Router
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let gate = AuthGate::require(state.tokens.clone(), role);

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/reset-password", patch(handlers::reset_password::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route(
            "/me",
            get(handlers::me::<R>).route_layer(from_fn_with_state(gate, authorize)),
        )
        .layer(Extension(role))
        .with_state(state)
}
