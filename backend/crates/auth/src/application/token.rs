//! Session Token Issuer / Verifier
//!
//! Tokens are HS256 JWTs carrying `{sub, role, designation?, iat, exp, jti}`.
//! Verification is a pure function of the token, the secret and the clock,
//! plus the optional in-process deny-list fed by logout.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use platform::token::{JwtSigner, TokenError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{
    admin_designation::AdminDesignation, principal_id::PrincipalId,
    principal_role::PrincipalRole,
};
use crate::error::{AuthError, AuthResult};

/// Claims carried by a session token
///
/// An unknown `role` string fails deserialisation, so such a token never
/// verifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Principal id
    pub sub: Uuid,
    pub role: PrincipalRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<AdminDesignation>,
    pub iat: i64,
    pub exp: i64,
    /// Token id, the deny-list key
    pub jti: Uuid,
}

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub token_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Identity recovered from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub principal_id: PrincipalId,
    pub role: PrincipalRole,
    pub designation: Option<AdminDesignation>,
    pub token_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Token ids revoked before their natural expiry
#[derive(Debug, Default)]
struct DenyList {
    // jti -> exp (unix seconds)
    entries: Mutex<HashMap<Uuid, i64>>,
}

impl DenyList {
    fn insert(&self, token_id: Uuid, exp: i64, now: i64) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, expires| *expires > now);
        entries.insert(token_id, exp);
    }

    fn contains(&self, token_id: &Uuid) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(token_id)
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Issues and verifies session tokens
#[derive(Debug)]
pub struct TokenService {
    signer: JwtSigner,
    config: AuthConfig,
    deny_list: Option<DenyList>,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let signer = JwtSigner::hs256(&config.token_secret)
            .map_err(|e| AuthError::Internal(format!("Invalid token secret: {}", e)))?;

        Ok(Self {
            signer,
            config: config.clone(),
            deny_list: config.revoke_on_logout.then(DenyList::default),
        })
    }

    /// Issue a token valid for the role's TTL starting now
    pub fn issue(
        &self,
        principal_id: PrincipalId,
        role: PrincipalRole,
        designation: Option<AdminDesignation>,
    ) -> AuthResult<IssuedToken> {
        self.issue_at(principal_id, role, designation, Utc::now())
    }

    /// Issue a token as if it were `issued_at`
    pub fn issue_at(
        &self,
        principal_id: PrincipalId,
        role: PrincipalRole,
        designation: Option<AdminDesignation>,
        issued_at: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let ttl = chrono::Duration::from_std(self.config.ttl_for(role))
            .map_err(|e| AuthError::Internal(format!("Token TTL out of range: {}", e)))?;
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal("Token expiry out of range".to_string()))?;

        let claims = AccessClaims {
            sub: principal_id.into_uuid(),
            role,
            designation,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = self
            .signer
            .sign(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(IssuedToken {
            token,
            token_id: claims.jti,
            expires_at,
        })
    }

    /// Verify a token; every failure collapses into `InvalidToken`
    pub fn verify(&self, token: &str) -> AuthResult<VerifiedToken> {
        let claims: AccessClaims = self.signer.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => tracing::debug!("Token expired"),
                other => tracing::debug!(error = %other, "Token rejected"),
            }
            AuthError::InvalidToken
        })?;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before exp
        let now = Utc::now().timestamp();
        if claims.exp <= now {
            return Err(AuthError::InvalidToken);
        }

        if self
            .deny_list
            .as_ref()
            .is_some_and(|list| list.contains(&claims.jti))
        {
            tracing::debug!(token_id = %claims.jti, "Token is revoked");
            return Err(AuthError::InvalidToken);
        }

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(AuthError::InvalidToken)?;

        Ok(VerifiedToken {
            principal_id: PrincipalId::from_uuid(claims.sub),
            role: claims.role,
            designation: claims.designation,
            token_id: claims.jti,
            expires_at,
        })
    }

    /// Deny-list a verified token until it expires
    ///
    /// Returns `false` when revocation is disabled.
    pub fn revoke(&self, token: &VerifiedToken) -> bool {
        match &self.deny_list {
            Some(list) => {
                list.insert(
                    token.token_id,
                    token.expires_at.timestamp(),
                    Utc::now().timestamp(),
                );
                true
            }
            None => false,
        }
    }

    pub fn revocation_enabled(&self) -> bool {
        self.deny_list.is_some()
    }

    /// Number of deny-listed token ids (pruned lazily on insert)
    pub fn revoked_count(&self) -> usize {
        self.deny_list.as_ref().map_or(0, DenyList::len)
    }
}
