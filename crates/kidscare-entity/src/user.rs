//! Account and credential payloads for the `/auth` endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use kidscare_core::types::Role;

/// Credentials exchanged for a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// Payload for creating an account (admin user management).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

/// Partial account update. The console never sends `role` for self-edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

/// Self-service password change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Admin password reset for another account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordReset {
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// `{"detail": "..."}` bodies used by the API for messages and errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn default_role() -> Role {
    Role::Staff
}
