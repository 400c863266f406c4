//! Scheduled activities.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::Resource;

/// A planned activity, optionally assigned to a staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub assigned_staff_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for scheduling an activity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivityCreate {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "crate::ids::deserialize_option")]
    pub assigned_staff_id: Option<i64>,
}

/// Partial update of an activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ActivityUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::ids::deserialize_option"
    )]
    pub assigned_staff_id: Option<i64>,
}

impl Resource for Activity {
    type Create = ActivityCreate;
    type Update = ActivityUpdate;

    const ENDPOINT: &'static str = "/activities";
    const LABEL: &'static str = "activity";

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned_staff_id_from_text() {
        let created = Activity::create_from_fields(&[
            "title=100 piece puzzle".to_string(),
            "assigned_staff_id=2".to_string(),
        ])
        .unwrap();
        assert_eq!(created.title, "100 piece puzzle");
        assert_eq!(created.assigned_staff_id, Some(2));

        let update = Activity::update_from_fields(&["description=42".to_string()]).unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"description": "42"})
        );
    }
}
