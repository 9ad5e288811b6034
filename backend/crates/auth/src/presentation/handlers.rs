//! HTTP Handlers
//!
//! One set of handlers serves all three variants; the variant comes from
//! the `Extension<PrincipalRole>` installed by the router.

use axum::Extension;
use axum::extract::State;
use axum::http::HeaderMap;
use kernel::extract::AppJson;
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    LoginUseCase, LogoutUseCase, ProfileUseCase, RegisterUseCase, ResetPasswordUseCase,
};
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::principal_role::PrincipalRole;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, PrincipalResponse, RegisterRequest, ResetPasswordRequest,
};
use crate::presentation::middleware::{AuthenticatedPrincipal, extract_token};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/{variant}/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Extension(role): Extension<PrincipalRole>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<ApiResponse<PrincipalResponse>>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let principal = use_case.execute(role, req.into()).await?;

    Ok(ApiResponse::created(
        format!("{} registered successfully", role.label()),
        PrincipalResponse::from(&principal),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/{variant}/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Extension(role): Extension<PrincipalRole>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<ApiResponse<LoginResponse>>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(role, req.into()).await?;

    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            principal: PrincipalResponse::from(&output.principal),
            token: output.token.token,
            expires_at: output.token.expires_at,
        },
    ))
}

// ============================================================================
// Reset Password
// ============================================================================

/// PATCH /api/{variant}/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Extension(role): Extension<PrincipalRole>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> AuthResult<ApiResponse<()>>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(role, req.into()).await?;

    Ok(ApiResponse::message("Password reset successful"))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/{variant}/logout
///
/// Always 200; the token is deny-listed only when revocation is enabled.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Extension(role): Extension<PrincipalRole>,
    headers: HeaderMap,
) -> ApiResponse<()>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    LogoutUseCase::new(state.tokens.clone()).execute(role, extract_token(&headers));

    ApiResponse::message("Logged out successfully")
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/{variant}/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    principal: AuthenticatedPrincipal,
) -> AuthResult<ApiResponse<PrincipalResponse>>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let found = use_case.execute(principal.principal_id).await?;

    Ok(ApiResponse::ok(
        "Profile retrieved successfully",
        PrincipalResponse::from(&found),
    ))
}
