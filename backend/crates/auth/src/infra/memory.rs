//! In-memory credential store
//!
//! Backs tests and database-less runs. Uniqueness is checked and the row
//! inserted under one write lock, so concurrent registrations of the same
//! identity resolve to exactly one record.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{
    email::Email, enrollment_number::EnrollmentNumber, faculty_id::FacultyId,
    principal_id::PrincipalId, principal_role::PrincipalRole, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryPrincipalRepository {
    inner: Arc<RwLock<HashMap<PrincipalId, Principal>>>,
}

impl MemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored principals
    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drop a principal (simulates an out-of-band deletion)
    pub async fn remove(&self, principal_id: &PrincipalId) -> Option<Principal> {
        self.inner.write().await.remove(principal_id)
    }

    async fn find_where(&self, pred: impl Fn(&Principal) -> bool) -> Option<Principal> {
        self.inner.read().await.values().find(|p| pred(p)).cloned()
    }
}

fn conflict(existing: &Principal, new: &Principal) -> Option<AuthError> {
    if existing.role() == new.role() && existing.email == new.email {
        return Some(AuthError::EmailTaken);
    }
    if let (Some(a), Some(b)) = (
        existing.profile.enrollment_number(),
        new.profile.enrollment_number(),
    ) {
        if a == b {
            return Some(AuthError::EnrollmentNumberTaken);
        }
    }
    if let (Some(a), Some(b)) = (existing.profile.faculty_id(), new.profile.faculty_id()) {
        if a == b {
            return Some(AuthError::FacultyIdTaken);
        }
    }
    None
}

impl PrincipalRepository for MemoryPrincipalRepository {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        let mut map = self.inner.write().await;
        if let Some(err) = map.values().find_map(|existing| conflict(existing, principal)) {
            return Err(err);
        }
        map.insert(principal.principal_id, principal.clone());
        Ok(())
    }

    async fn find_by_id(&self, principal_id: &PrincipalId) -> AuthResult<Option<Principal>> {
        Ok(self.inner.read().await.get(principal_id).cloned())
    }

    async fn find_by_email(
        &self,
        role: PrincipalRole,
        email: &Email,
    ) -> AuthResult<Option<Principal>> {
        Ok(self
            .find_where(|p| p.role() == role && &p.email == email)
            .await)
    }

    async fn find_by_enrollment_number(
        &self,
        enrollment_number: &EnrollmentNumber,
    ) -> AuthResult<Option<Principal>> {
        Ok(self
            .find_where(|p| p.profile.enrollment_number() == Some(enrollment_number))
            .await)
    }

    async fn exists_by_email(&self, role: PrincipalRole, email: &Email) -> AuthResult<bool> {
        Ok(self.find_by_email(role, email).await?.is_some())
    }

    async fn exists_by_enrollment_number(
        &self,
        enrollment_number: &EnrollmentNumber,
    ) -> AuthResult<bool> {
        Ok(self
            .find_by_enrollment_number(enrollment_number)
            .await?
            .is_some())
    }

    async fn exists_by_faculty_id(&self, faculty_id: &FacultyId) -> AuthResult<bool> {
        Ok(self
            .find_where(|p| p.profile.faculty_id() == Some(faculty_id))
            .await
            .is_some())
    }

    async fn update_password(
        &self,
        principal_id: &PrincipalId,
        password_hash: &UserPassword,
        updated_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut map = self.inner.write().await;
        let principal = map
            .get_mut(principal_id)
            .ok_or(AuthError::PrincipalNotFound)?;
        principal.password_hash = password_hash.clone();
        principal.updated_at = updated_at;
        Ok(())
    }
}
