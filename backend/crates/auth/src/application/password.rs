//! Password hashing off the async executor
//!
//! Argon2id takes tens of milliseconds of CPU per call. These helpers move
//! the work onto tokio's blocking pool so request handling keeps flowing.

use std::sync::{Arc, OnceLock};

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Hash a policy-checked password
pub async fn hash_password(raw: RawPassword, config: Arc<AuthConfig>) -> AuthResult<UserPassword> {
    tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, config.pepper()))
        .await?
        .map_err(AuthError::from)
}

/// Verify a candidate against a stored hash
pub async fn verify_password(
    raw: RawPassword,
    hash: UserPassword,
    config: Arc<AuthConfig>,
) -> AuthResult<bool> {
    let matches =
        tokio::task::spawn_blocking(move || hash.verify(&raw, config.pepper())).await?;
    Ok(matches)
}

/// Burn one verification for an identifier that does not exist
///
/// Keeps the unknown-identifier path about as slow as the wrong-password
/// path. Always returns `false`.
pub async fn verify_against_dummy(raw: RawPassword, config: Arc<AuthConfig>) -> AuthResult<bool> {
    let hash = dummy_hash().await?;
    verify_password(raw, hash, config).await?;
    Ok(false)
}

static DUMMY_HASH: OnceLock<UserPassword> = OnceLock::new();

async fn dummy_hash() -> AuthResult<UserPassword> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash.clone());
    }

    let hash = tokio::task::spawn_blocking(|| {
        let filler = platform::crypto::to_base64(&platform::crypto::random_bytes(24));
        UserPassword::from_raw(&RawPassword::candidate(filler), None)
    })
    .await??;

    Ok(DUMMY_HASH.get_or_init(|| hash).clone())
}
