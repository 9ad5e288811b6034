//! Logout Use Case
//!
//! Logout always succeeds from the client's point of view. With revocation
//! enabled, a valid token of the matching variant is deny-listed until it
//! expires; anything else is ignored.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::value_object::principal_role::PrincipalRole;

pub struct LogoutUseCase {
    tokens: Arc<TokenService>,
}

impl LogoutUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Returns whether a token was revoked
    pub fn execute(&self, role: PrincipalRole, token: Option<&str>) -> bool {
        if !self.tokens.revocation_enabled() {
            return false;
        }

        let Some(verified) = token.and_then(|t| self.tokens.verify(t).ok()) else {
            return false;
        };
        if verified.role != role {
            return false;
        }

        let revoked = self.tokens.revoke(&verified);
        if revoked {
            tracing::info!(
                principal_id = %verified.principal_id,
                token_id = %verified.token_id,
                "Token revoked on logout"
            );
        }
        revoked
    }
}
