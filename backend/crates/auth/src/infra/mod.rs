//! Infrastructure Layer
//!
//! Credential store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryPrincipalRepository;
pub use postgres::PgPrincipalRepository;
