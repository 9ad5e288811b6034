//! Vocabulary shared by the auth and attendance crates
//!
//! - [`error`]: `AppError`, its classification and the error envelope
//! - [`response`]: the success envelope `{success, message, data}`
//! - [`id`]: typed UUID identifiers
//! - `extract` (feature `axum`): a JSON extractor that rejects with the envelope

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod reporting;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod response;
