//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so that a missing field surfaces as a
//! "Missing required fields" validation error instead of a body rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{LoginInput, RegisterInput, ResetPasswordInput};
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{
    admin_designation::AdminDesignation, principal_role::PrincipalRole,
};

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub faculty_id: Option<String>,
    pub enrollment_number: Option<String>,
    /// Admin only; `role` is accepted as well
    #[serde(alias = "role")]
    pub designation: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            faculty_id: req.faculty_id,
            enrollment_number: req.enrollment_number,
            designation: req.designation,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub enrollment_number: Option<String>,
    pub password: Option<String>,
    /// Admin designation (`HOD` | `Director`)
    #[serde(alias = "designation")]
    pub role: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            email: req.email,
            enrollment_number: req.enrollment_number,
            password: req.password,
            designation: req.role,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub principal: PrincipalResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Reset Password
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

impl From<ResetPasswordRequest> for ResetPasswordInput {
    fn from(req: ResetPasswordRequest) -> Self {
        ResetPasswordInput {
            email: req.email,
            old_password: req.old_password,
            new_password: req.new_password,
        }
    }
}

// ============================================================================
// Principal
// ============================================================================

/// Sanitised principal (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub principal_id: Uuid,
    pub role: PrincipalRole,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<AdminDesignation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(p: &Principal) -> Self {
        PrincipalResponse {
            principal_id: p.principal_id.into_uuid(),
            role: p.role(),
            email: p.email.as_str().to_owned(),
            designation: p.profile.designation(),
            full_name: p.profile.full_name().map(|n| n.as_str().to_owned()),
            faculty_id: p.profile.faculty_id().map(|f| f.as_str().to_owned()),
            enrollment_number: p
                .profile
                .enrollment_number()
                .map(|e| e.as_str().to_owned()),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
