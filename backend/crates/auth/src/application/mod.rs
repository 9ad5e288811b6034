//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use profile::ProfileUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use token::{AccessClaims, IssuedToken, TokenService, VerifiedToken};
