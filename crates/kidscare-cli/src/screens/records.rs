//! Generic list, form and details screens for record sections.

use tokio_util::sync::CancellationToken;

use kidscare_client::fetch;
use kidscare_core::result::AppResult;
use kidscare_session::Screen;

use super::rows::Listed;
use super::{confirm, required_id, return_to_list};
use crate::console::Console;
use crate::output;

/// Render one record screen for `E`.
pub async fn render<E: Listed>(
    console: &mut Console,
    screen: Screen,
    id: Option<i64>,
    action: &super::Action,
    cancel: &CancellationToken,
) -> AppResult<()> {
    let api = console.records::<E>();

    match screen {
        Screen::List(_) => {
            if let Some(target) = action.delete {
                if !confirm(console, &format!("Delete {} #{target}?", E::LABEL))? {
                    output::print_warning("Delete cancelled");
                } else {
                    let detail = fetch(cancel, api.delete(target)).await.into_result()?;
                    output::print_success(
                        &detail.unwrap_or_else(|| format!("Deleted {} #{target}", E::LABEL)),
                    );
                }
            }
            let items = fetch(cancel, api.get_all()).await.into_result()?;
            let rows: Vec<E::Row> = items.iter().map(Listed::row).collect();
            output::print_list(&rows, console.format, console.theme());
        }
        Screen::Create(section) => {
            if action.fields.is_empty() {
                print_form_hint::<E>();
                return Ok(());
            }
            let payload = E::create_from_fields(&action.fields)?;
            let created = fetch(cancel, api.create(&payload)).await.into_result()?;
            output::print_success(&format!("Created {} #{}", E::LABEL, created.id()));
            return_to_list(console, section);
        }
        Screen::Edit(section) => {
            let id = required_id(id)?;
            if action.fields.is_empty() {
                let current = fetch(cancel, api.get_by_id(id)).await.into_result()?;
                output::print_record(&current, console.format);
                print_form_hint::<E>();
                return Ok(());
            }
            let payload = E::update_from_fields(&action.fields)?;
            fetch(cancel, api.update(id, &payload)).await.into_result()?;
            output::print_success(&format!("Updated {} #{id}", E::LABEL));
            return_to_list(console, section);
        }
        Screen::Details(_) => {
            let id = required_id(id)?;
            let record = fetch(cancel, api.get_by_id(id)).await.into_result()?;
            output::print_record(&record, console.format);
            record.print_related(console.format, console.theme());
        }
        _ => {}
    }
    Ok(())
}

fn print_form_hint<E: Listed>() {
    output::print_kv("Required fields", &E::REQUIRED.join(", "));
    output::print_kv("Submit with", "--field key=value (repeatable)");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use kidscare_core::error::ErrorKind;
    use kidscare_core::types::Role;

    use crate::screens::Action;
    use crate::testing::{self, Recorder};

    fn children_api(recorder: Arc<Recorder>) -> Router {
        let created = recorder.clone();
        let updated = recorder;
        Router::new()
            .route(
                "/children/",
                get(|| async { Json(json!([{ "id": 4, "name": "Leo" }, { "id": 5, "name": "Ava" }])) })
                    .post(move |Json(body): Json<Value>| {
                        let created = created.clone();
                        async move {
                            let name = body["name"].clone();
                            created.keep_body(body);
                            Json(json!({ "id": 11, "name": name }))
                        }
                    }),
            )
            .route(
                "/children/{id}",
                delete(|| async { Json(json!({ "detail": "Child deleted" })) }).put(
                    move |Json(body): Json<Value>| {
                        let updated = updated.clone();
                        async move {
                            updated.keep_body(body);
                            Json(json!({ "id": 4, "name": "Leo" }))
                        }
                    },
                ),
            )
    }

    #[tokio::test]
    async fn test_create_sends_text_fields_and_returns_to_list() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(children_api(recorder.clone()), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(7, Role::Staff), "tok".to_string());

        testing::open(
            &mut console,
            "/staff/children/new",
            testing::fields(&["name=Mia", "parent_contact=5551234567", "address=101"]),
        )
        .await
        .unwrap();

        let body = &recorder.bodies()[0];
        assert_eq!(body["name"], "Mia");
        assert_eq!(body["parent_contact"], "5551234567");
        assert_eq!(body["address"], "101");
        assert_eq!(recorder.calls(), vec!["POST /children/"]);
        assert_eq!(console.navigator.current_path(), Some("/staff/children"));
    }

    #[tokio::test]
    async fn test_list_delete_without_prompt() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(children_api(recorder.clone()), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(1, Role::Admin), "tok".to_string());

        let action = Action {
            fields: Vec::new(),
            delete: Some(4),
        };
        testing::open(&mut console, "/admin/children", action).await.unwrap();

        assert_eq!(recorder.calls(), vec!["DELETE /children/4", "GET /children/"]);
    }

    #[tokio::test]
    async fn test_edit_sends_only_given_fields() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(children_api(recorder.clone()), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(7, Role::Staff), "tok".to_string());

        testing::open(
            &mut console,
            "/staff/children/edit/4",
            testing::fields(&["allergies=none", "parent_contact=0412"]),
        )
        .await
        .unwrap();

        assert_eq!(
            recorder.bodies(),
            vec![json!({ "allergies": "none", "parent_contact": "0412" })]
        );
        assert_eq!(recorder.calls(), vec!["PUT /children/4"]);
        assert_eq!(console.navigator.current_path(), Some("/staff/children"));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_the_api() {
        let recorder = Arc::new(Recorder::default());
        let base = testing::serve(children_api(recorder.clone()), recorder.clone()).await;
        let mut console = testing::console(&base, None);
        console.store.establish(testing::user(7, Role::Staff), "tok".to_string());

        let err = testing::open(&mut console, "/staff/children/new", testing::fields(&["gender=F"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(recorder.calls().is_empty());
        assert_eq!(console.navigator.current_path(), Some("/staff/children/new"));
    }
}
