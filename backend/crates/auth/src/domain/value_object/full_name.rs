//! Full Name Value Object
//!
//! NFKC normalised, inner whitespace collapsed, 1..=100 characters.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const FULL_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct FullName(String);

impl FullName {
    pub fn new(input: &str) -> AppResult<Self> {
        let normalized: String = input.nfkc().collect();
        let name = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        if name.is_empty() {
            return Err(AppError::bad_request("Full name is required").with_error("fullName"));
        }

        if name.chars().count() > FULL_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at most {} characters",
                FULL_NAME_MAX_LENGTH
            ))
            .with_error("fullName"));
        }

        if name.chars().any(char::is_control) {
            return Err(
                AppError::bad_request("Full name contains invalid characters").with_error("fullName"),
            );
        }

        Ok(Self(name))
    }

    #[inline]
    pub fn from_db(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
