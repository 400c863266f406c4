//! The authenticated user record returned by `GET /auth/me`.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The currently authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Coarse permission class.
    pub role: Role,
}

impl UserRecord {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
