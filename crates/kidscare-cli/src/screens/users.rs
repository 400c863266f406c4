//! User management screens (admin subtree).

use tokio_util::sync::CancellationToken;

use kidscare_client::fetch;
use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_entity::payload_from_fields;
use kidscare_entity::user::{UserCreate, UserUpdate};
use kidscare_session::Screen;

use super::rows::UserRow;
use super::{Action, confirm, required_id, return_to_list};
use crate::console::Console;
use crate::output;

pub async fn render(
    console: &mut Console,
    screen: Screen,
    id: Option<i64>,
    action: &Action,
    cancel: &CancellationToken,
) -> AppResult<()> {
    let auth = console.auth();

    match screen {
        Screen::List(_) => {
            if let Some(target) = action.delete {
                if !confirm(console, &format!("Delete user #{target}?"))? {
                    output::print_warning("Delete cancelled");
                } else {
                    let detail = fetch(cancel, auth.delete_user(target)).await.into_result()?;
                    output::print_success(&detail);
                }
            }
            let users = fetch(cancel, auth.list_users()).await.into_result()?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, console.format, console.theme());
        }
        Screen::Create(section) => {
            if action.fields.is_empty() {
                output::print_kv("Required fields", "name, email, password");
                output::print_kv("Optional", "role (admin, staff or parent; default staff)");
                return Ok(());
            }
            let payload: UserCreate = payload_from_fields(&action.fields)?;
            let created = fetch(cancel, auth.register(&payload)).await.into_result()?;
            output::print_success(&format!("Created user #{} ({})", created.id, created.role));
            return_to_list(console, section);
        }
        Screen::Edit(section) => {
            let id = required_id(id)?;
            if action.fields.is_empty() {
                let users = fetch(cancel, auth.list_users()).await.into_result()?;
                let user = users
                    .iter()
                    .find(|u| u.id == id)
                    .ok_or_else(|| AppError::not_found(format!("User #{id} not found")))?;
                output::print_record(user, console.format);
                output::print_kv("Editable fields", "name, email, role, password");
                return Ok(());
            }
            let payload: UserUpdate = payload_from_fields(&action.fields)?;
            let updated = fetch(cancel, auth.update_user(id, &payload)).await.into_result()?;
            output::print_success(&format!("Updated user #{}", updated.id));

            // Keep our own session record current when an admin edits themselves.
            if let Some(me) = console.store.user() {
                if me.id == updated.id && me.role == updated.role {
                    console.store.set_user(updated)?;
                    console.store.persist_user()?;
                }
            }
            return_to_list(console, section);
        }
        _ => {}
    }
    Ok(())
}

/// Staff-role accounts that can still be given a staff profile.
pub async fn print_available_staff(console: &Console, cancel: &CancellationToken) -> AppResult<()> {
    let users = fetch(cancel, console.auth().available_staff_users())
        .await
        .into_result()?;
    output::print_heading("Accounts without a staff profile");
    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    output::print_list(&rows, console.format, console.theme());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::Path;
    use axum::routing::{post, put};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use kidscare_core::types::Role;

    use crate::testing::{self, Recorder};

    fn auth_api(recorder: Arc<Recorder>) -> Router {
        let registered = recorder.clone();
        let updated = recorder;
        Router::new()
            .route(
                "/auth/register",
                post(move |Json(body): Json<Value>| {
                    let registered = registered.clone();
                    async move {
                        let reply = json!({
                            "id": 20, "name": body["name"], "email": body["email"], "role": body["role"]
                        });
                        registered.keep_body(body);
                        Json(reply)
                    }
                }),
            )
            .route(
                "/auth/update/{id}",
                put(move |Path(id): Path<i64>, Json(body): Json<Value>| {
                    let updated = updated.clone();
                    async move {
                        let name = body.get("name").cloned().unwrap_or(json!("Jamie"));
                        updated.keep_body(body);
                        Json(json!({ "id": id, "name": name, "email": "jamie@kids.test", "role": "admin" }))
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_create_user_with_numeric_password() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(auth_api(recorder.clone()), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(1, Role::Admin), "tok".to_string());

        testing::open(
            &mut console,
            "/admin/users/new",
            testing::fields(&["name=Kim", "email=kim@kids.test", "password=123456"]),
        )
        .await
        .unwrap();

        assert_eq!(
            recorder.bodies(),
            vec![json!({
                "name": "Kim", "email": "kim@kids.test", "password": "123456", "role": "staff"
            })]
        );
        assert_eq!(console.navigator.current_path(), Some("/admin/users"));
    }

    #[tokio::test]
    async fn test_admin_editing_own_account_updates_session() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(auth_api(recorder.clone()), recorder.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut console = testing::console(&base, Some(&path));
        console.store.establish(testing::user(7, Role::Admin), "tok".to_string());
        console.store.persist().unwrap();

        testing::open(&mut console, "/admin/users/edit/7", testing::fields(&["name=Jamie Lee"]))
            .await
            .unwrap();

        assert_eq!(recorder.calls(), vec!["PUT /auth/update/7"]);
        assert_eq!(console.store.user().unwrap().name, "Jamie Lee");
        drop(console);

        let reopened = testing::console(&base, Some(&path));
        assert_eq!(reopened.store.user().unwrap().name, "Jamie Lee");
        assert_eq!(reopened.store.token().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_editing_another_account_leaves_session_alone() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(auth_api(recorder.clone()), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(7, Role::Admin), "tok".to_string());

        testing::open(&mut console, "/admin/users/edit/9", testing::fields(&["name=Other"]))
            .await
            .unwrap();

        assert_eq!(console.store.user().unwrap().name, "Jamie");
        assert_eq!(console.navigator.current_path(), Some("/admin/users"));
    }
}
