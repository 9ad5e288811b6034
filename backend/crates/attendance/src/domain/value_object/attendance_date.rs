use std::fmt;

use chrono::NaiveDate;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date of an attendance record (no time, no zone)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceDate(NaiveDate);

impl AttendanceDate {
    /// Parse a `YYYY-MM-DD` string
    pub fn parse(input: &str) -> AppResult<Self> {
        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| {
                AppError::bad_request("Date must be a valid calendar date (YYYY-MM-DD)")
                    .with_error("date")
            })
    }

    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for AttendanceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
