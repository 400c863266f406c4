//! Dashboard statistics.

use chrono::NaiveDate;
use serde::Serialize;

use kidscare_core::result::AppResult;
use kidscare_entity::{AttendanceRecord, Child, StaffMember};

use crate::http::ApiClient;
use crate::resource::ResourceApi;

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_children: usize,
    pub total_staff: usize,
    pub today_attendance: usize,
}

impl DashboardStats {
    /// Load children, staff and attendance concurrently and count them.
    ///
    /// Fails as a whole if any of the three requests fails.
    pub async fn load(client: &ApiClient, today: NaiveDate) -> AppResult<Self> {
        let children = ResourceApi::<Child>::new(client.clone());
        let staff = ResourceApi::<StaffMember>::new(client.clone());
        let attendance = ResourceApi::<AttendanceRecord>::new(client.clone());

        let (children, staff, attendance) =
            futures::try_join!(children.get_all(), staff.get_all(), attendance.get_all())?;

        Ok(Self {
            total_children: children.len(),
            total_staff: staff.len(),
            today_attendance: attendance.iter().filter(|a| a.date == today).count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use kidscare_core::error::ErrorKind;

    use crate::testing;

    fn fake_api(staff_status: StatusCode) -> Router {
        Router::new()
            .route(
                "/children/",
                get(|| async { Json(json!([{ "id": 1, "name": "Mia" }, { "id": 2, "name": "Noah" }])) }),
            )
            .route(
                "/staff/",
                get(move || async move { (staff_status, Json(json!([{ "id": 1, "user_id": 4 }]))) }),
            )
            .route(
                "/attendance/",
                get(|| async {
                    Json(json!([
                        { "id": 1, "child_id": 1, "date": "2026-10-19", "status": "Present" },
                        { "id": 2, "child_id": 2, "date": "2026-10-19", "status": "Absent" },
                        { "id": 3, "child_id": 1, "date": "2026-10-18", "status": "Present" }
                    ]))
                }),
            )
    }

    #[tokio::test]
    async fn test_counts() {
        let base = testing::serve(fake_api(StatusCode::OK)).await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let stats = DashboardStats::load(&testing::client(&base), today).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_children: 2,
                total_staff: 1,
                today_attendance: 2
            }
        );
    }

    #[tokio::test]
    async fn test_any_failure_fails_the_dashboard() {
        let base = testing::serve(fake_api(StatusCode::FORBIDDEN)).await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let err = DashboardStats::load(&testing::client(&base), today)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
