use derive_more::Display;
use kernel::error::app_error::AppResult;
use serde::{Deserialize, Serialize};

use super::normalize_code;

/// Student enrollment number, unique across students and used as the
/// student login identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct EnrollmentNumber(String);

impl EnrollmentNumber {
    pub fn new(input: &str) -> AppResult<Self> {
        normalize_code(input, "enrollmentNumber", "Enrollment number").map(Self)
    }

    #[inline]
    pub fn from_db(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_and_case_preserved() {
        let n = EnrollmentNumber::new("  E100 ").unwrap();
        assert_eq!(n.as_str(), "E100");
        assert_eq!(n.to_string(), "E100");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(EnrollmentNumber::new("").is_err());
        assert!(EnrollmentNumber::new("E 100").is_err());
        assert!(EnrollmentNumber::new(&"9".repeat(33)).is_err());
        assert!(EnrollmentNumber::new("2024/CS-017").is_ok());
    }
}
