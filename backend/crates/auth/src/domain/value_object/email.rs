//! Login email
//!
//! Stored and compared in its normalised form (trimmed, lower-cased), so
//! `Jane@X.com` and `jane@x.com` are the same principal within a role.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

/// RFC 5321 path limit
const MAX_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let email = raw.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty").with_error("email"));
        }
        if email.len() > MAX_LEN {
            return Err(AppError::bad_request(format!(
                "Email must be at most {MAX_LEN} characters"
            ))
            .with_error("email"));
        }
        if !looks_like_address(&email) {
            return Err(AppError::bad_request("Invalid email format")
                .with_error("email")
                .with_action("Please enter an address like name@example.com"));
        }

        Ok(Self(email))
    }

    /// Row value, already normalised when it was written
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `local@host.tld` with no whitespace and a plain ASCII domain
fn looks_like_address(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && !tld.is_empty()
        && !host.starts_with(['.', '-'])
        && !domain.ends_with('-')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for ok in [
            "user@example.com",
            "user.name@example.co.jp",
            "user+tag@example.com",
            "  padded@example.com  ",
        ] {
            assert!(Email::new(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for bad in [
            "",
            "   ",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "user@example.",
            "us er@example.com",
        ] {
            let err = Email::new(bad).unwrap_err();
            assert_eq!(err.status_code(), 400, "{bad}");
            assert_eq!(err.errors()[0], "email");
        }
    }

    #[test]
    fn test_normalises_case_and_whitespace() {
        let email = Email::new(" Jane@X.com ").unwrap();
        assert_eq!(email.as_str(), "jane@x.com");
        assert_eq!(email, Email::new("jane@x.com").unwrap());
    }
}
