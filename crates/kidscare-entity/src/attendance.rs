//! Daily check-in/check-out records.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::Resource;

/// One child's attendance on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub child_id: i64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for recording attendance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttendanceCreate {
    #[validate(range(min = 1))]
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub child_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    #[serde(default = "default_status")]
    #[validate(length(min = 1))]
    pub status: String,
}

/// Partial update of an attendance record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AttendanceUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::ids::deserialize_option"
    )]
    pub child_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn default_status() -> String {
    "Present".to_string()
}

impl Resource for AttendanceRecord {
    type Create = AttendanceCreate;
    type Update = AttendanceUpdate;

    const ENDPOINT: &'static str = "/attendance";
    const LABEL: &'static str = "attendance record";

    fn id(&self) -> i64 {
        self.id
    }
}
