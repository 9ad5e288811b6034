use derive_more::Display;
use kernel::error::app_error::AppResult;
use serde::{Deserialize, Serialize};

use super::normalize_code;

/// Staff identifier issued to faculty members (unique)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct FacultyId(String);

impl FacultyId {
    pub fn new(input: &str) -> AppResult<Self> {
        normalize_code(input, "facultyId", "Faculty ID").map(Self)
    }

    #[inline]
    pub fn from_db(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
