//! Random bytes and base64 for secrets that live in config

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};

/// Length of a generated HS256 signing secret
pub const GENERATED_SECRET_LEN: usize = 64;

/// Bytes straight from the OS generator
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Throwaway signing secret for runs without `JWT_SECRET`
pub fn generated_secret() -> Vec<u8> {
    random_bytes(GENERATED_SECRET_LEN)
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes a config value such as `PASSWORD_PEPPER`; surrounding whitespace is ignored
pub fn from_base64(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(value.trim())
}
