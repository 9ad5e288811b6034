//! Authorization Gate
//!
//! Runs ahead of protected routes. Reads the token from `x-auth-token`
//! (falling back to `Authorization: Bearer`), verifies it and applies the
//! route's role policy:
//!
//! - no token: 401 `Unauthenticated`
//! - token fails verification: 401 `InvalidToken`
//! - wrong role: 403 `Forbidden`
//!
//! On success the decoded identity is stored in the request extensions and
//! handlers read it through the [`AuthenticatedPrincipal`] extractor.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token::TokenService;
use crate::domain::value_object::{
    admin_designation::AdminDesignation, principal_id::PrincipalId,
    principal_role::PrincipalRole,
};
use crate::error::AuthError;

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Gate configuration for one group of routes
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
    required: Option<PrincipalRole>,
}

impl AuthGate {
    /// Any valid token passes
    pub fn authenticated(tokens: Arc<TokenService>) -> Self {
        Self {
            tokens,
            required: None,
        }
    }

    /// Only tokens of `role` pass
    pub fn require(tokens: Arc<TokenService>, role: PrincipalRole) -> Self {
        Self {
            tokens,
            required: Some(role),
        }
    }

    fn check(&self, headers: &HeaderMap) -> Result<AuthenticatedPrincipal, AuthError> {
        let token = extract_token(headers).ok_or(AuthError::Unauthenticated)?;
        let verified = self.tokens.verify(token)?;

        if let Some(required) = self.required {
            if verified.role != required {
                return Err(AuthError::Forbidden { required });
            }
        }

        Ok(AuthenticatedPrincipal {
            principal_id: verified.principal_id,
            role: verified.role,
            designation: verified.designation,
        })
    }
}

/// Middleware entry point, for `axum::middleware::from_fn_with_state`
pub async fn authorize(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = gate.check(req.headers())?;

    tracing::debug!(
        principal_id = %principal.principal_id,
        role = %principal.role,
        "Request authorized"
    );

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Token from `x-auth-token`, else from a Bearer `Authorization` header
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let custom = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if custom.is_some() {
        return custom;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, token) = v.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|t| !t.is_empty())
}

/// Identity attached by [`authorize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub principal_id: PrincipalId,
    pub role: PrincipalRole,
    pub designation: Option<AdminDesignation>,
}

impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Missing only when a route forgot the gate
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_prefers_custom_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("abc"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_token(&headers), Some("abc"));
    }

    #[test]
    fn test_extract_token_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer  xyz "));
        assert_eq!(extract_token(&headers), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_extract_token_absent_or_blank() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_token(&headers), None);
    }
}
