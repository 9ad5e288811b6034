//! Register Use Case
//!
//! Creates a new principal of the variant chosen by the route. Registration
//! never issues a token; the caller logs in afterwards.

use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::application::config::AuthConfig;
use crate::application::password::hash_password;
use crate::domain::entity::principal::{Principal, PrincipalProfile};
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{
    admin_designation::AdminDesignation, email::Email, enrollment_number::EnrollmentNumber,
    faculty_id::FacultyId, full_name::FullName, principal_role::PrincipalRole,
    user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Register input (fields as received; the use case validates them)
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub faculty_id: Option<String>,
    pub enrollment_number: Option<String>,
    pub designation: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, role: PrincipalRole, input: RegisterInput) -> AuthResult<Principal> {
        // (a) required common fields
        let mut missing = Vec::new();
        let email = present(input.email, "email", &mut missing);
        let password = present(input.password, "password", &mut missing);
        let full_name = match role {
            PrincipalRole::Admin => None,
            _ => present(input.full_name, "fullName", &mut missing),
        };
        let designation = match role {
            PrincipalRole::Admin => present(input.designation, "designation", &mut missing),
            _ => None,
        };
        if !missing.is_empty() {
            return Err(missing_fields(missing));
        }
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Internal("Required fields vanished".into()));
        };

        // (b) email format
        let email = Email::new(&email)?;

        // (c) password policy
        let raw_password = RawPassword::new(password)?;

        // (d) variant identity field
        let profile = match role {
            PrincipalRole::Admin => PrincipalProfile::Admin {
                designation: AdminDesignation::parse(designation.as_deref().unwrap_or_default())?,
            },
            PrincipalRole::Faculty => PrincipalProfile::Faculty {
                faculty_id: FacultyId::new(input.faculty_id.as_deref().unwrap_or_default())?,
                full_name: FullName::new(full_name.as_deref().unwrap_or_default())?,
            },
            PrincipalRole::Student => PrincipalProfile::Student {
                enrollment_number: EnrollmentNumber::new(
                    input.enrollment_number.as_deref().unwrap_or_default(),
                )?,
                full_name: FullName::new(full_name.as_deref().unwrap_or_default())?,
            },
        };

        // Uniqueness pre-check; the store re-checks on insert
        if self.repo.exists_by_email(role, &email).await? {
            return Err(AuthError::EmailTaken);
        }
        if let Some(number) = profile.enrollment_number() {
            if self.repo.exists_by_enrollment_number(number).await? {
                return Err(AuthError::EnrollmentNumberTaken);
            }
        }
        if let Some(faculty_id) = profile.faculty_id() {
            if self.repo.exists_by_faculty_id(faculty_id).await? {
                return Err(AuthError::FacultyIdTaken);
            }
        }

        let password_hash = hash_password(raw_password, self.config.clone()).await?;
        let principal = Principal::new(email, password_hash, profile);

        self.repo.create(&principal).await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            "Principal registered"
        );

        Ok(principal)
    }
}

/// Keep a non-blank field, or record its name as missing
pub(crate) fn present(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

pub(crate) fn missing_fields(missing: Vec<&'static str>) -> AuthError {
    AuthError::Validation(AppError::missing_fields(&missing))
}
