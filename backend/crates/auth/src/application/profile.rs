//! Profile Use Case
//!
//! Loads the principal behind an authenticated request.

use std::sync::Arc;

use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::principal_id::PrincipalId;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A valid token whose principal is gone yields `PrincipalNotFound`
    pub async fn execute(&self, principal_id: PrincipalId) -> AuthResult<Principal> {
        self.repo
            .find_by_id(&principal_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)
    }
}
