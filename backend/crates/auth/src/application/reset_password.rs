//! Reset Password Use Case
//!
//! Replaces the password of a principal who proves knowledge of the old
//! one. Unknown email and wrong old password both fail with
//! `InvalidCredentials` and leave the store untouched. Issued tokens stay
//! valid until they expire.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::password::{hash_password, verify_against_dummy, verify_password};
use crate::application::register::{missing_fields, present};
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{
    email::Email, principal_role::PrincipalRole, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct ResetPasswordInput {
    pub email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct ResetPasswordUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, role: PrincipalRole, input: ResetPasswordInput) -> AuthResult<()> {
        let mut missing = Vec::new();
        let email = present(input.email, "email", &mut missing);
        let old_password = present(input.old_password, "oldPassword", &mut missing);
        let new_password = present(input.new_password, "newPassword", &mut missing);
        if !missing.is_empty() {
            return Err(missing_fields(missing));
        }
        let (Some(email), Some(old_password), Some(new_password)) =
            (email, old_password, new_password)
        else {
            return Err(AuthError::Internal("Required fields vanished".into()));
        };

        let candidate = RawPassword::candidate(old_password);

        let principal = match Email::new(&email) {
            Ok(email) => self.repo.find_by_email(role, &email).await?,
            Err(_) => None,
        };
        let Some(mut principal) = principal else {
            verify_against_dummy(candidate, self.config.clone()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let old_ok = verify_password(
            candidate,
            principal.password_hash.clone(),
            self.config.clone(),
        )
        .await?;
        if !old_ok {
            tracing::debug!(principal_id = %principal.principal_id, "Reset with wrong old password");
            return Err(AuthError::InvalidCredentials);
        }

        let new_password = RawPassword::with_field(new_password, "newPassword")?;
        let new_hash = hash_password(new_password, self.config.clone()).await?;

        principal.change_password(new_hash);
        self.repo
            .update_password(
                &principal.principal_id,
                &principal.password_hash,
                principal.updated_at,
            )
            .await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            "Password reset"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::domain::entity::principal::Principal;
    use crate::domain::repository::PrincipalRepository;
    use crate::infra::memory::MemoryPrincipalRepository;

    async fn setup() -> (
        ResetPasswordUseCase<MemoryPrincipalRepository>,
        Arc<MemoryPrincipalRepository>,
        Principal,
    ) {
        let repo = Arc::new(MemoryPrincipalRepository::default());
        let config = Arc::new(AuthConfig::development());
        let principal = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(
                PrincipalRole::Faculty,
                RegisterInput {
                    email: Some("ada@x.com".into()),
                    password: Some("secret1".into()),
                    full_name: Some("Ada Lovelace".into()),
                    faculty_id: Some("F1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (ResetPasswordUseCase::new(repo.clone(), config), repo, principal)
    }

    fn input(email: &str, old: &str, new: &str) -> ResetPasswordInput {
        ResetPasswordInput {
            email: Some(email.into()),
            old_password: Some(old.into()),
            new_password: Some(new.into()),
        }
    }

    async fn stored(repo: &MemoryPrincipalRepository, principal: &Principal) -> Principal {
        repo.find_by_id(&principal.principal_id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_reset_replaces_hash() {
        let (use_case, repo, principal) = setup().await;

        use_case
            .execute(PrincipalRole::Faculty, input("ADA@x.com", "secret1", "secret2"))
            .await
            .unwrap();

        let after = stored(&repo, &principal).await;
        assert!(after.password_hash.verify(&RawPassword::candidate("secret2".into()), None));
        assert!(!after.password_hash.verify(&RawPassword::candidate("secret1".into()), None));
        assert!(after.updated_at >= principal.updated_at);
    }

    #[tokio::test]
    async fn test_wrong_old_password_leaves_store_untouched() {
        let (use_case, repo, principal) = setup().await;

        let err = use_case
            .execute(PrincipalRole::Faculty, input("ada@x.com", "nope!!", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let after = stored(&repo, &principal).await;
        assert_eq!(after.password_hash, principal.password_hash);
        assert_eq!(after.updated_at, principal.updated_at);
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let (use_case, _, _) = setup().await;
        let err = use_case
            .execute(PrincipalRole::Faculty, input("ghost@x.com", "secret1", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        // Right email, wrong variant
        let err = use_case
            .execute(PrincipalRole::Student, input("ada@x.com", "secret1", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_short_new_password_is_validation_error() {
        let (use_case, repo, principal) = setup().await;
        let err = use_case
            .execute(PrincipalRole::Faculty, input("ada@x.com", "secret1", "12345"))
            .await
            .unwrap_err();

        match err {
            AuthError::Validation(e) => assert_eq!(e.errors()[0], "newPassword"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(stored(&repo, &principal).await.password_hash, principal.password_hash);
    }

    #[tokio::test]
    async fn test_all_fields_required() {
        let (use_case, _, _) = setup().await;
        let err = use_case
            .execute(
                PrincipalRole::Faculty,
                ResetPasswordInput {
                    email: Some("ada@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code().as_u16(), 400);
    }
}
