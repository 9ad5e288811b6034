use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Whether the owner attended on a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Storage / wire code
    pub const fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    /// Parse user input (exact, lower-case)
    pub fn parse(input: &str) -> AppResult<Self> {
        Self::from_code(input.trim()).ok_or_else(|| {
            AppError::bad_request("Status must be either present or absent").with_error("status")
        })
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
