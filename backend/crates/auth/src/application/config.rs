//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use crate::domain::value_object::principal_role::PrincipalRole;

/// Shortest accepted token lifetime (1 hour)
pub const MIN_TOKEN_TTL: Duration = Duration::from_secs(3600);
/// Longest accepted token lifetime (7 days)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Token lifetime for administrators (7 days)
    pub admin_token_ttl: Duration,
    /// Token lifetime for faculty (1 hour)
    pub faculty_token_ttl: Duration,
    /// Token lifetime for students (1 hour)
    pub student_token_ttl: Duration,
    /// Deny-list token ids on logout
    pub revoke_on_logout: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            admin_token_ttl: Duration::from_secs(7 * 24 * 3600), // 7 days
            faculty_token_ttl: Duration::from_secs(3600),       // 1 hour
            student_token_ttl: Duration::from_secs(3600),       // 1 hour
            revoke_on_logout: false,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Default TTLs with a random token secret, for development and tests
    ///
    /// Tokens do not survive a restart with this secret.
    pub fn development() -> Self {
        Self {
            token_secret: platform::crypto::generated_secret(),
            ..Default::default()
        }
    }

    /// Token lifetime for a role
    pub fn ttl_for(&self, role: PrincipalRole) -> Duration {
        match role {
            PrincipalRole::Admin => self.admin_token_ttl,
            PrincipalRole::Faculty => self.faculty_token_ttl,
            PrincipalRole::Student => self.student_token_ttl,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("admin_token_ttl", &self.admin_token_ttl)
            .field("faculty_token_ttl", &self.faculty_token_ttl)
            .field("student_token_ttl", &self.student_token_ttl)
            .field("revoke_on_logout", &self.revoke_on_logout)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
