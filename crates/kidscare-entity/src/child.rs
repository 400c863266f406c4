//! Enrolled children.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::attendance::AttendanceRecord;
use crate::billing::BillingRecord;
use crate::health::HealthRecord;
use crate::resource::Resource;

/// A child enrolled at the center, with the records the details screen shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    /// Server-assigned identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub dob: Option<NaiveDate>,
    /// Gender as entered by staff.
    pub gender: Option<String>,
    /// Parent or guardian name.
    pub parent_name: Option<String>,
    /// Parent or guardian phone/email.
    pub parent_contact: Option<String>,
    /// Home address.
    pub address: Option<String>,
    /// Known allergies.
    pub allergies: Option<String>,
    /// Other medical notes.
    pub medical_info: Option<String>,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Health records for this child.
    #[serde(default)]
    pub health_records: Vec<HealthRecord>,
    /// Attendance history for this child.
    #[serde(default)]
    pub attendance_records: Vec<AttendanceRecord>,
    /// Invoices for this child.
    #[serde(default)]
    pub billings: Vec<BillingRecord>,
}

/// Payload for enrolling a child.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChildCreate {
    /// Full name (required).
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub parent_contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub medical_info: Option<String>,
}

/// Partial update of a child; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ChildUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_info: Option<String>,
}

impl Resource for Child {
    type Create = ChildCreate;
    type Update = ChildUpdate;

    const ENDPOINT: &'static str = "/children";
    const LABEL: &'static str = "child";

    fn id(&self) -> i64 {
        self.id
    }
}
