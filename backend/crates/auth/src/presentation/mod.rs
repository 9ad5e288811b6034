//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the authorization gate.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AUTH_TOKEN_HEADER, AuthGate, AuthenticatedPrincipal, authorize, extract_token};
pub use router::auth_router;
