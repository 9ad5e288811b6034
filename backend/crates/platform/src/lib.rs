//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure random bytes, Base64)
//! - Password policy and hashing (Argon2id)
//! - Signed session tokens (HS256 JWT)

pub mod crypto;
pub mod password;
pub mod token;
