//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Principal entity, value objects, repository trait
//! - `application/` - Use cases, token service, hashing offload
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, authorization gate
//!
//! ## Features
//! - Registration and login for three principal variants (admin, faculty, student)
//! - Password reset by proof of the old password
//! - Stateless HS256 session tokens with an optional logout deny-list
//! - Role-restricted routes behind `AuthGate`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool, optional pepper
//! - Unknown identifiers and wrong passwords are indistinguishable to clients
//! - Plaintext passwords, hashes and tokens never reach the logs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use domain::value_object::principal_role::PrincipalRole;
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryPrincipalRepository, PgPrincipalRepository};
pub use presentation::middleware::{AuthGate, AuthenticatedPrincipal, authorize};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
