//! Login Use Case
//!
//! Verifies credentials and issues a session token.
//!
//! Identifiers per variant: admin and faculty log in by email (admins also
//! state their designation), students by enrollment number. An unknown
//! identifier, a wrong password and a mismatched designation all fail with
//! the same `InvalidCredentials`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::password::{verify_against_dummy, verify_password};
use crate::application::register::{missing_fields, present};
use crate::application::token::{IssuedToken, TokenService};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{
    admin_designation::AdminDesignation, email::Email, enrollment_number::EnrollmentNumber,
    principal_role::PrincipalRole, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Login input
#[derive(Debug, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub enrollment_number: Option<String>,
    pub password: Option<String>,
    /// Admin role selector (`HOD` | `Director`)
    pub designation: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub principal: Principal,
    pub token: IssuedToken,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, role: PrincipalRole, input: LoginInput) -> AuthResult<LoginOutput> {
        let mut missing = Vec::new();
        let identifier = match role {
            PrincipalRole::Student => {
                present(input.enrollment_number, "enrollmentNumber", &mut missing)
            }
            _ => present(input.email, "email", &mut missing),
        };
        let password = present(input.password, "password", &mut missing);
        let designation = match role {
            PrincipalRole::Admin => present(input.designation, "role", &mut missing),
            _ => None,
        };
        if !missing.is_empty() {
            return Err(missing_fields(missing));
        }
        let (Some(identifier), Some(password)) = (identifier, password) else {
            return Err(AuthError::Internal("Required fields vanished".into()));
        };

        let expected_designation = designation
            .as_deref()
            .map(AdminDesignation::parse)
            .transpose()?;

        let candidate = RawPassword::candidate(password);

        let Some(principal) = self.lookup(role, &identifier).await? else {
            verify_against_dummy(candidate, self.config.clone()).await?;
            tracing::debug!(role = %role, "Login for unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        let password_ok = verify_password(
            candidate,
            principal.password_hash.clone(),
            self.config.clone(),
        )
        .await?;

        if !password_ok || principal.profile.designation() != expected_designation {
            tracing::debug!(principal_id = %principal.principal_id, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(
            principal.principal_id,
            principal.role(),
            principal.profile.designation(),
        )?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            token_id = %token.token_id,
            "Principal logged in"
        );

        Ok(LoginOutput { principal, token })
    }

    /// Malformed identifiers are treated as unknown ones
    async fn lookup(&self, role: PrincipalRole, identifier: &str) -> AuthResult<Option<Principal>> {
        match role {
            PrincipalRole::Student => match EnrollmentNumber::new(identifier) {
                Ok(number) => self.repo.find_by_enrollment_number(&number).await,
                Err(_) => Ok(None),
            },
            _ => match Email::new(identifier) {
                Ok(email) => self.repo.find_by_email(role, &email).await,
                Err(_) => Ok(None),
            },
        }
    }
}
