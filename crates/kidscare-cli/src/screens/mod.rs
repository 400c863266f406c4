//! Screen rendering for resolved navigations.
//!
//! Each screen fetches its own data under the caller's cancellation token
//! and prints it. Screens never check roles: by the time one renders, the
//! navigator has already applied the route guard.

pub mod dashboard;
pub mod records;
pub mod rows;
pub mod settings;
pub mod users;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_entity::{Activity, AttendanceRecord, BillingRecord, Child, HealthRecord, StaffMember};
use kidscare_session::{Resolution, Screen, Section};

use crate::console::Console;
use crate::output;

/// What the user asked a screen to do besides showing itself.
#[derive(Debug, Clone, Default)]
pub struct Action {
    /// `key=value` form fields for create/edit/settings screens.
    pub fields: Vec<String>,
    /// Record to delete from a list screen.
    pub delete: Option<i64>,
}

/// Render the outcome of a navigation.
pub async fn render(
    console: &mut Console,
    resolution: Resolution,
    action: &Action,
    cancel: &CancellationToken,
) -> AppResult<()> {
    match resolution {
        Resolution::Render {
            path,
            screen,
            subtree,
            params,
            redirected_from,
        } => {
            if !redirected_from.is_empty() {
                debug!(?redirected_from, to = %path, "Navigation redirected");
                output::print_redirect(&path);
            }
            output::print_heading(&format!("{screen}  [{path}]"));

            let id = match params.iter().find(|(k, _)| k == "id") {
                Some((_, raw)) => Some(
                    raw.parse::<i64>()
                        .map_err(|_| AppError::validation(format!("Invalid record id '{raw}'")))?,
                ),
                None => None,
            };

            match screen {
                Screen::Login => {
                    output::print_kv("Status", "Not logged in");
                    output::print_kv("Next", "kidscare login");
                    Ok(())
                }
                Screen::Dashboard => dashboard::render(console, subtree, cancel).await,
                Screen::AdminSettings | Screen::StaffSettings => {
                    settings::render(console, action, cancel).await
                }
                Screen::List(section)
                | Screen::Create(section)
                | Screen::Edit(section)
                | Screen::Details(section) => {
                    render_section(console, screen, section, id, action, cancel).await
                }
            }
        }
        Resolution::NotFound { path, dashboard } => Err(AppError::not_found(format!(
            "Page not found: {path}. Return to dashboard: {dashboard}"
        ))),
        Resolution::Forbidden { path, role } => {
            let role = role.map(|r| r.to_string()).unwrap_or_else(|| "anonymous".to_string());
            Err(AppError::authorization(format!(
                "The {role} role has no console screens ({path})"
            )))
        }
    }
}

async fn render_section(
    console: &mut Console,
    screen: Screen,
    section: Section,
    id: Option<i64>,
    action: &Action,
    cancel: &CancellationToken,
) -> AppResult<()> {
    match section {
        Section::Children => records::render::<Child>(console, screen, id, action, cancel).await,
        Section::Staff => {
            if matches!(screen, Screen::Create(_)) && action.fields.is_empty() {
                users::print_available_staff(console, cancel).await?;
            }
            records::render::<StaffMember>(console, screen, id, action, cancel).await
        }
        Section::Attendance => {
            records::render::<AttendanceRecord>(console, screen, id, action, cancel).await
        }
        Section::Activities => records::render::<Activity>(console, screen, id, action, cancel).await,
        Section::Health => records::render::<HealthRecord>(console, screen, id, action, cancel).await,
        Section::Billing => records::render::<BillingRecord>(console, screen, id, action, cancel).await,
        Section::Users => users::render(console, screen, id, action, cancel).await,
        Section::Settings => settings::render(console, action, cancel).await,
    }
}

/// After a successful save, move to the section's list screen.
pub(crate) fn return_to_list(console: &mut Console, section: Section) {
    let list = console.paths().section(section);
    output::print_redirect(&list);
    console.navigator.navigate(&list);
}

/// Ask before a destructive action unless `--yes` was given.
pub(crate) fn confirm(console: &Console, prompt: &str) -> AppResult<bool> {
    if console.assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// The `:id` a screen needs.
pub(crate) fn required_id(id: Option<i64>) -> AppResult<i64> {
    id.ok_or_else(|| AppError::validation("This screen needs a record id"))
}
