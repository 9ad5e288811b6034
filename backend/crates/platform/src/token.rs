//! Signed session tokens (HS256 JWT)
//!
//! [`JwtSigner`] is claim-agnostic: callers bring their own claim type.
//! Validation requires `exp`, `iat` and `sub`, checks the signature and
//! rejects expired tokens with zero leeway.

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Minimum accepted secret length in bytes (HS256 key size)
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signing secret is shorter than [`MIN_SECRET_LENGTH`]
    #[error("Token secret must be at least 32 bytes (got {0})")]
    WeakSecret(usize),

    #[error("Token has expired")]
    Expired,

    /// Bad signature, malformed token, missing claim, wrong algorithm...
    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// HS256 signer/verifier bound to one secret
#[derive(Clone)]
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn hs256(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret(secret.len()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
