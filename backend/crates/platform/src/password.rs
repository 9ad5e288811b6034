//! Argon2id password digests
//!
//! New passwords go through [`PlainPassword::new`], which NFKC-normalises
//! and then checks the length and character rules. Login candidates and
//! the old password on reset use [`PlainPassword::candidate`]; they are
//! only ever compared against a stored digest, never stored themselves.
//!
//! An optional pepper is appended to the password bytes before hashing and
//! verification. Changing it invalidates every stored digest.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Code points, after normalisation
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters (got {0})")]
    TooShort(usize),

    #[error("Password must be at most {MAX_PASSWORD_LENGTH} characters (got {0})")]
    TooLong(usize),

    #[error("Password cannot be blank")]
    Blank,

    /// Control characters other than tab and newline
    #[error("Password contains control characters")]
    ControlCharacter,
}

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    #[error("Stored password digest is not a PHC string")]
    Malformed,
}

/// Normalised password text, wiped from memory on drop
///
/// ```rust
/// use platform::password::PlainPassword;
///
/// let password = PlainPassword::new("hunter22".to_string()).unwrap();
/// assert_eq!(format!("{password:?}"), "PlainPassword([REDACTED])");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(raw: String) -> Result<Self, PolicyViolation> {
        let password = Self::candidate(raw);
        password.check()?;
        Ok(password)
    }

    /// Normalise only; a candidate that breaks the policy just fails to verify
    pub fn candidate(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn check(&self) -> Result<(), PolicyViolation> {
        if self.0.trim().is_empty() {
            return Err(PolicyViolation::Blank);
        }

        match self.0.chars().count() {
            n if n < MIN_PASSWORD_LENGTH => return Err(PolicyViolation::TooShort(n)),
            n if n > MAX_PASSWORD_LENGTH => return Err(PolicyViolation::TooLong(n)),
            _ => {}
        }

        if self
            .0
            .chars()
            .any(|ch| ch.is_control() && !matches!(ch, '\t' | '\n'))
        {
            return Err(PolicyViolation::ControlCharacter);
        }

        Ok(())
    }

    fn with_pepper(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        bytes.extend_from_slice(pepper.unwrap_or_default());
        bytes
    }

    /// Argon2id with the crate defaults (m=19456 KiB, t=2, p=1) and a fresh salt
    pub fn digest(&self, pepper: Option<&[u8]>) -> Result<PasswordDigest, DigestError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(&self.with_pepper(pepper), &salt)
            .map_err(DigestError::Hashing)?
            .to_string();

        Ok(PasswordDigest(phc))
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword([REDACTED])")
    }
}

/// PHC string as stored in `principals.password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn parse(phc: impl Into<String>) -> Result<Self, DigestError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| DigestError::Malformed)?;
        Ok(Self(phc))
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison; any mismatch, pepper included, is `false`
    pub fn matches(&self, password: &PlainPassword, pepper: Option<&[u8]>) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(&password.with_pepper(pepper), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(raw: &str) -> PlainPassword {
        PlainPassword::candidate(raw.to_string())
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            PlainPassword::new("12345".to_string()).unwrap_err(),
            PolicyViolation::TooShort(5)
        );
        assert!(PlainPassword::new("123456".to_string()).is_ok());
        assert!(PlainPassword::new("a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert_eq!(
            PlainPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err(),
            PolicyViolation::TooLong(MAX_PASSWORD_LENGTH + 1)
        );
    }

    #[test]
    fn test_blank_and_control_characters() {
        for raw in ["", "        "] {
            assert_eq!(
                PlainPassword::new(raw.to_string()).unwrap_err(),
                PolicyViolation::Blank
            );
        }
        assert_eq!(
            PlainPassword::new("abc\u{0007}def".to_string()).unwrap_err(),
            PolicyViolation::ControlCharacter
        );
        assert!(PlainPassword::new("tab\there".to_string()).is_ok());
    }

    #[test]
    fn test_length_counts_code_points() {
        // 6 code points, 18 bytes
        assert!(PlainPassword::new("パスワード安".to_string()).is_ok());
    }

    #[test]
    fn test_nfkc_equivalent_inputs_match() {
        let fullwidth = PlainPassword::new("１２３４５６".to_string()).unwrap();
        let digest = fullwidth.digest(None).unwrap();
        assert!(digest.matches(&plain("123456"), None));
    }

    #[test]
    fn test_digest_and_match() {
        let digest = plain("secret123").digest(None).unwrap();

        assert!(digest.as_phc().starts_with("$argon2id$"));
        assert!(digest.matches(&plain("secret123"), None));
        assert!(!digest.matches(&plain("secret124"), None));
        assert_ne!(digest, plain("secret123").digest(None).unwrap());
    }

    #[test]
    fn test_pepper_must_match() {
        let pepper = b"app-pepper";
        let digest = plain("secret123").digest(Some(pepper)).unwrap();

        assert!(digest.matches(&plain("secret123"), Some(pepper)));
        assert!(!digest.matches(&plain("secret123"), None));
        assert!(!digest.matches(&plain("secret123"), Some(b"other")));
    }

    #[test]
    fn test_parse_stored_digest() {
        let digest = plain("secret123").digest(None).unwrap();
        let restored = PasswordDigest::parse(digest.as_phc()).unwrap();
        assert!(restored.matches(&plain("secret123"), None));

        assert!(matches!(
            PasswordDigest::parse("not_a_valid_hash"),
            Err(DigestError::Malformed)
        ));
    }

    #[test]
    fn test_debug_never_shows_secrets() {
        let password = plain("secret123");
        assert!(!format!("{password:?}").contains("secret"));
        let digest = password.digest(None).unwrap();
        assert!(!format!("{digest:?}").contains("argon2"));
    }
}
