//! Account settings: profile, theme, and where the console points.

use tokio_util::sync::CancellationToken;

use kidscare_client::{ProfileFlow, fetch};
use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_core::types::Theme;
use kidscare_entity::parse_fields;

use super::Action;
use crate::console::Console;
use crate::output;

/// Show settings, or apply `name=`, `email=` and `theme=` fields.
pub async fn render(console: &mut Console, action: &Action, cancel: &CancellationToken) -> AppResult<()> {
    if !action.fields.is_empty() {
        apply(console, &action.fields, cancel).await?;
    }

    let user = console.require_login()?;
    output::print_kv("Name", &user.name);
    output::print_kv("Email", &user.email);
    output::print_kv("Role", user.role.as_str());
    output::print_kv("Theme", console.theme().as_str());
    output::print_kv("API", console.client.base_url());
    Ok(())
}

async fn apply(console: &mut Console, fields: &[String], cancel: &CancellationToken) -> AppResult<()> {
    let map = parse_fields(fields)?;
    let mut name = None;
    let mut email = None;
    let mut theme = None;
    for (key, value) in map {
        let serde_json::Value::String(text) = value else {
            continue;
        };
        match key.as_str() {
            "name" => name = Some(text),
            "email" => email = Some(text),
            "theme" => theme = Some(text.parse::<Theme>()?),
            other => {
                return Err(AppError::validation(format!(
                    "Unknown settings field '{other}' (expected name, email or theme)"
                )));
            }
        }
    }

    if let Some(theme) = theme {
        console.store.set_theme(theme)?;
        output::print_success(&format!("Theme set to {theme}"));
    }

    if name.is_some() || email.is_some() {
        let flow = ProfileFlow::new(console.auth(), console.store.clone());
        let user = fetch(cancel, flow.update_profile(name, email))
            .await
            .into_result()?;
        output::print_success(&format!("Profile updated for {}", user.email));
    }
    Ok(())
}
