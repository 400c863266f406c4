//! Staff profiles attached to user accounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use kidscare_core::types::UserRecord;

use crate::resource::Resource;

/// A staff member's employment profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    /// Server-assigned identifier.
    pub id: i64,
    /// The user account this profile belongs to.
    pub user_id: i64,
    pub contact: Option<String>,
    pub position: Option<String>,
    pub assigned_room: Option<String>,
    pub hire_date: Option<NaiveDate>,
    /// The linked user account, when the server includes it.
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl StaffMember {
    /// Name to show in lists: the linked user's name, or the user id.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| format!("user #{}", self.user_id))
    }
}

/// Payload for creating a staff profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaffCreate {
    /// The user account to attach (required).
    #[validate(range(min = 1))]
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub user_id: i64,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub assigned_room: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

/// Partial update of a staff profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StaffUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
}

impl Resource for StaffMember {
    type Create = StaffCreate;
    type Update = StaffUpdate;

    const ENDPOINT: &'static str = "/staff";
    const LABEL: &'static str = "staff member";

    fn id(&self) -> i64 {
        self.id
    }
}
