use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag of a principal, derived from its variant
///
/// Carried in session tokens and stored in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalRole {
    Admin,
    Faculty,
    Student,
}

impl PrincipalRole {
    pub const ALL: [PrincipalRole; 3] = [Self::Admin, Self::Faculty, Self::Student];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use PrincipalRole::*;
        match self {
            Admin => "admin",
            Faculty => "faculty",
            Student => "student",
        }
    }

    /// Unknown codes yield `None`; callers decide whether that is a
    /// corrupt row or an invalid token.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use PrincipalRole::*;
        match code {
            "admin" => Some(Admin),
            "faculty" => Some(Faculty),
            "student" => Some(Student),
            _ => None,
        }
    }

    /// Capitalised name used in user-facing messages
    #[inline]
    pub const fn label(&self) -> &'static str {
        use PrincipalRole::*;
        match self {
            Admin => "Admin",
            Faculty => "Faculty",
            Student => "Student",
        }
    }
}

impl fmt::Display for PrincipalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
