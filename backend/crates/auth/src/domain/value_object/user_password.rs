//! Principal passwords
//!
//! [`RawPassword`] is what a client sent; [`UserPassword`] is what the store
//! keeps. Policy violations surface as 400s naming the offending field.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("secret1".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(stored.verify(&raw, None));
//! ```

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    DigestError, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordDigest, PlainPassword,
    PolicyViolation,
};

pub struct RawPassword(PlainPassword);

impl RawPassword {
    /// A new password for registration, checked against the policy
    pub fn new(raw: String) -> AppResult<Self> {
        Self::with_field(raw, "password")
    }

    /// Policy-checked password reported under `field` (e.g. `newPassword`)
    pub fn with_field(raw: String, field: &'static str) -> AppResult<Self> {
        PlainPassword::new(raw)
            .map(Self)
            .map_err(|violation| policy_error(violation).with_error(field))
    }

    /// Login or old-password input; compared only, never stored
    pub fn candidate(raw: String) -> Self {
        Self(PlainPassword::candidate(raw))
    }
}

fn policy_error(violation: PolicyViolation) -> AppError {
    match violation {
        PolicyViolation::TooShort(_) => AppError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )),
        PolicyViolation::TooLong(_) => AppError::bad_request(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
        )),
        PolicyViolation::Blank => AppError::bad_request("Password cannot be empty"),
        PolicyViolation::ControlCharacter => {
            AppError::bad_request("Password contains invalid characters")
                .with_action("Please remove any special control characters")
        }
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored Argon2id digest
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(PasswordDigest);

impl UserPassword {
    /// CPU-bound; async callers go through `application::password`
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .digest(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    pub fn from_phc_string(phc: impl Into<String>) -> AppResult<Self> {
        PasswordDigest::parse(phc).map(Self).map_err(|e: DigestError| {
            AppError::internal("Invalid password hash in database").with_source(e)
        })
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.matches(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_are_bad_requests() {
        assert!(RawPassword::new("secret1".to_string()).is_ok());

        let err = RawPassword::new("12345".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Password must be at least 6 characters long");
        assert_eq!(err.errors()[0], "password");

        assert!(RawPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
        assert_eq!(
            RawPassword::new(String::new()).unwrap_err().message(),
            "Password cannot be empty"
        );
    }

    #[test]
    fn test_field_name_is_reported() {
        let err = RawPassword::with_field("abc".to_string(), "newPassword").unwrap_err();
        assert_eq!(err.errors()[0], "newPassword");
    }

    #[test]
    fn test_candidate_skips_policy() {
        let stored =
            UserPassword::from_raw(&RawPassword::new("secret1".to_string()).unwrap(), None)
                .unwrap();
        assert!(!stored.verify(&RawPassword::candidate("abc".to_string()), None));
        assert!(stored.verify(&RawPassword::candidate("secret1".to_string()), None));
    }

    #[test]
    fn test_pepper_is_applied() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, Some(b"app_secret_pepper")).unwrap();

        assert!(stored.verify(&raw, Some(b"app_secret_pepper")));
        assert!(!stored.verify(&raw, None));
    }

    #[test]
    fn test_stored_form_round_trips() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(stored.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));

        let err = UserPassword::from_phc_string("plaintext").unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword".to_string()).unwrap();
        assert_eq!(format!("{raw:?}"), "RawPassword([REDACTED])");
        let stored = UserPassword::from_raw(&raw, None).unwrap();
        assert_eq!(format!("{stored:?}"), "UserPassword([HASH])");
    }
}
