//! Principal Entity
//!
//! Anything that can authenticate: an administrator, a faculty member or a
//! student. The variant-specific data lives in [`PrincipalProfile`]; every
//! flow (register, login, reset) works on the one `Principal` type.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    admin_designation::AdminDesignation, email::Email, enrollment_number::EnrollmentNumber,
    faculty_id::FacultyId, full_name::FullName, principal_id::PrincipalId,
    principal_role::PrincipalRole, user_password::UserPassword,
};

/// Variant-specific data of a principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalProfile {
    Admin {
        designation: AdminDesignation,
    },
    Faculty {
        faculty_id: FacultyId,
        full_name: FullName,
    },
    Student {
        enrollment_number: EnrollmentNumber,
        full_name: FullName,
    },
}

impl PrincipalProfile {
    pub fn role(&self) -> PrincipalRole {
        match self {
            Self::Admin { .. } => PrincipalRole::Admin,
            Self::Faculty { .. } => PrincipalRole::Faculty,
            Self::Student { .. } => PrincipalRole::Student,
        }
    }

    pub fn designation(&self) -> Option<AdminDesignation> {
        match self {
            Self::Admin { designation } => Some(*designation),
            _ => None,
        }
    }

    pub fn full_name(&self) -> Option<&FullName> {
        match self {
            Self::Faculty { full_name, .. } | Self::Student { full_name, .. } => Some(full_name),
            Self::Admin { .. } => None,
        }
    }

    pub fn faculty_id(&self) -> Option<&FacultyId> {
        match self {
            Self::Faculty { faculty_id, .. } => Some(faculty_id),
            _ => None,
        }
    }

    pub fn enrollment_number(&self) -> Option<&EnrollmentNumber> {
        match self {
            Self::Student {
                enrollment_number, ..
            } => Some(enrollment_number),
            _ => None,
        }
    }
}

/// Principal entity
///
/// `Debug` never prints the password hash (see `UserPassword`).
#[derive(Debug, Clone)]
pub struct Principal {
    pub principal_id: PrincipalId,
    /// Trimmed, lower-cased; unique per role
    pub email: Email,
    pub password_hash: UserPassword,
    pub profile: PrincipalProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(email: Email, password_hash: UserPassword, profile: PrincipalProfile) -> Self {
        let now = Utc::now();

        Self {
            principal_id: PrincipalId::new(),
            email,
            password_hash,
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn role(&self) -> PrincipalRole {
        self.profile.role()
    }

    /// Replace the stored hash and bump `updated_at`
    pub fn change_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn hash(raw: &str) -> UserPassword {
        UserPassword::from_raw(&RawPassword::new(raw.to_string()).unwrap(), None).unwrap()
    }

    #[test]
    fn test_role_follows_variant() {
        let student = Principal::new(
            Email::new("jane@x.com").unwrap(),
            hash("secret1"),
            PrincipalProfile::Student {
                enrollment_number: EnrollmentNumber::new("E100").unwrap(),
                full_name: FullName::new("Jane Doe").unwrap(),
            },
        );
        assert_eq!(student.role(), PrincipalRole::Student);
        assert_eq!(student.profile.full_name().unwrap().as_str(), "Jane Doe");
        assert!(student.profile.designation().is_none());
        assert_eq!(student.created_at, student.updated_at);

        let admin = PrincipalProfile::Admin {
            designation: AdminDesignation::Director,
        };
        assert_eq!(admin.role(), PrincipalRole::Admin);
        assert_eq!(admin.designation(), Some(AdminDesignation::Director));
        assert!(admin.full_name().is_none());
    }

    #[test]
    fn test_change_password_bumps_updated_at() {
        let mut principal = Principal::new(
            Email::new("hod@x.com").unwrap(),
            hash("secret1"),
            PrincipalProfile::Admin {
                designation: AdminDesignation::Hod,
            },
        );
        let before = principal.updated_at;
        principal.change_password(hash("secret2"));

        assert!(principal.updated_at >= before);
        assert!(principal
            .password_hash
            .verify(&RawPassword::candidate("secret2".to_string()), None));
    }

    #[test]
    fn test_debug_hides_hash() {
        let principal = Principal::new(
            Email::new("f@x.com").unwrap(),
            hash("secret1"),
            PrincipalProfile::Faculty {
                faculty_id: FacultyId::new("F1").unwrap(),
                full_name: FullName::new("Ada").unwrap(),
            },
        );
        assert!(!format!("{:?}", principal).contains("argon2"));
    }
}
