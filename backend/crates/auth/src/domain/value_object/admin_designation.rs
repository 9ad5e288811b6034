//! Admin Designation Value Object
//!
//! Administrators are either a Head of Department or a Director. The
//! designation doubles as the role selector on admin login.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminDesignation {
    #[serde(rename = "HOD")]
    Hod,
    Director,
}

impl AdminDesignation {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Hod => "HOD",
            Self::Director => "Director",
        }
    }

    /// Parse user input; surrounding whitespace and letter case are ignored
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("hod") {
            Ok(Self::Hod)
        } else if trimmed.eq_ignore_ascii_case("director") {
            Ok(Self::Director)
        } else {
            Err(
                AppError::bad_request("Designation must be either HOD or Director")
                    .with_error("designation"),
            )
        }
    }

    /// Create from database value
    pub fn from_db(code: &str) -> Option<Self> {
        match code {
            "HOD" => Some(Self::Hod),
            "Director" => Some(Self::Director),
            _ => None,
        }
    }
}

impl fmt::Display for AdminDesignation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
