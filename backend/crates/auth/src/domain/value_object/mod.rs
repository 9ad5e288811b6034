//! Value Object Module

pub mod admin_designation;
pub mod email;
pub mod enrollment_number;
pub mod faculty_id;
pub mod full_name;
pub mod principal_id;
pub mod principal_role;
pub mod user_password;

use kernel::error::app_error::{AppError, AppResult};

/// Maximum length of an institution-issued code (enrollment number, faculty id)
pub const CODE_MAX_LENGTH: usize = 32;

/// Validate an institution-issued code
///
/// Trimmed, 1..=32 characters of `A-Z a-z 0-9 - _ /`. Case is preserved.
fn normalize_code(input: &str, field: &'static str, label: &str) -> AppResult<String> {
    let code = input.trim();

    if code.is_empty() {
        return Err(AppError::bad_request(format!("{} is required", label)).with_error(field));
    }

    if code.chars().count() > CODE_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            label, CODE_MAX_LENGTH
        ))
        .with_error(field));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
    {
        return Err(AppError::bad_request(format!(
            "{} may only contain letters, digits, '-', '_' and '/'",
            label
        ))
        .with_error(field));
    }

    Ok(code.to_string())
}
