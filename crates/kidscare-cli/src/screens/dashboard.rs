//! The dashboard screen shared by both subtrees.

use chrono::Local;
use tokio_util::sync::CancellationToken;

use kidscare_client::{DashboardStats, FetchState, fetch};
use kidscare_core::result::AppResult;

use crate::console::Console;
use crate::output::{self, OutputFormat};

pub async fn render(
    console: &mut Console,
    subtree: Option<&'static str>,
    cancel: &CancellationToken,
) -> AppResult<()> {
    let user = console.require_login()?;
    let today = Local::now().date_naive();

    let stats = fetch(cancel, DashboardStats::load(&console.client, today)).await;
    if console.format == OutputFormat::Json {
        let stats = stats.into_result()?;
        output::print_record(&stats, console.format);
        return Ok(());
    }

    println!("Welcome back, {}", user.name);
    match stats {
        FetchState::Ready(stats) => {
            output::print_kv("Total Children", &stats.total_children.to_string());
            output::print_kv("Active Staff", &stats.total_staff.to_string());
            output::print_kv("Today's Attendance", &stats.today_attendance.to_string());
        }
        FetchState::Failed(e) if e.is_cancelled() => return Err(e),
        // The screen renders without statistics.
        FetchState::Failed(e) => output::print_warning(&format!("Statistics unavailable: {}", e.message)),
        FetchState::Loading => {}
    }

    if let Some(tree) = subtree.and_then(|name| console.navigator.table().subtree(name)) {
        output::print_heading("Navigation");
        for item in tree.navigation() {
            output::print_kv(item.label, &item.path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use kidscare_core::error::ErrorKind;
    use kidscare_core::types::Role;

    use crate::output::OutputFormat;
    use crate::screens::Action;
    use crate::testing::{self, Recorder};

    fn stats_api(staff_status: StatusCode) -> Router {
        Router::new()
            .route("/children/", get(|| async { Json(json!([{ "id": 1, "name": "Mia" }])) }))
            .route(
                "/staff/",
                get(move || async move { (staff_status, Json(json!([]))) }),
            )
            .route("/attendance/", get(|| async { Json(json!([])) }))
    }

    #[tokio::test]
    async fn test_dashboard_loads_all_counts() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(stats_api(StatusCode::OK), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(7, Role::Staff), "tok".to_string());

        testing::open(&mut console, "/staff", Action::default()).await.unwrap();

        let mut calls = recorder.calls();
        calls.sort();
        assert_eq!(calls, vec!["GET /attendance/", "GET /children/", "GET /staff/"]);
    }

    #[tokio::test]
    async fn test_failed_statistics_still_render_in_table_mode() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(stats_api(StatusCode::FORBIDDEN), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(7, Role::Staff), "tok".to_string());

        assert!(testing::open(&mut console, "/staff", Action::default()).await.is_ok());

        console.format = OutputFormat::Json;
        let err = testing::open(&mut console, "/staff", Action::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
