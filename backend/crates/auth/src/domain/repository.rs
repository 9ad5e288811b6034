//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer (`infra::postgres`, `infra::memory`).

use chrono::{DateTime, Utc};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{
    email::Email, enrollment_number::EnrollmentNumber, faculty_id::FacultyId,
    principal_id::PrincipalId, principal_role::PrincipalRole, user_password::UserPassword,
};
use crate::error::AuthResult;

/// Credential store
///
/// `create` is the final arbiter of uniqueness: a duplicate email (per role),
/// enrollment number or faculty id fails with the matching `AuthError::*Taken`
/// variant even when it races a concurrent registration.
#[trait_variant::make(PrincipalRepository: Send)]
pub trait LocalPrincipalRepository {
    /// Insert a new principal
    async fn create(&self, principal: &Principal) -> AuthResult<()>;

    async fn find_by_id(&self, principal_id: &PrincipalId) -> AuthResult<Option<Principal>>;

    /// Find by normalised email within one role
    async fn find_by_email(
        &self,
        role: PrincipalRole,
        email: &Email,
    ) -> AuthResult<Option<Principal>>;

    async fn find_by_enrollment_number(
        &self,
        enrollment_number: &EnrollmentNumber,
    ) -> AuthResult<Option<Principal>>;

    async fn exists_by_email(&self, role: PrincipalRole, email: &Email) -> AuthResult<bool>;

    async fn exists_by_enrollment_number(
        &self,
        enrollment_number: &EnrollmentNumber,
    ) -> AuthResult<bool>;

    async fn exists_by_faculty_id(&self, faculty_id: &FacultyId) -> AuthResult<bool>;

    /// Overwrite the password hash; `PrincipalNotFound` if the row is gone
    async fn update_password(
        &self,
        principal_id: &PrincipalId,
        password_hash: &UserPassword,
        updated_at: DateTime<Utc>,
    ) -> AuthResult<()>;
}
