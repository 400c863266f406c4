//! Health records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::Resource;

/// A medical note for a child.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    pub child_id: i64,
    pub description: String,
    pub doctor_name: Option<String>,
    pub record_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for adding a health record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HealthRecordCreate {
    #[validate(range(min = 1))]
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub child_id: i64,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
}

/// Partial update of a health record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HealthRecordUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_date: Option<NaiveDate>,
}

impl Resource for HealthRecord {
    type Create = HealthRecordCreate;
    type Update = HealthRecordUpdate;

    const ENDPOINT: &'static str = "/health-records";
    const LABEL: &'static str = "health record";

    fn id(&self) -> i64 {
        self.id
    }
}
