//! `kidscare routes`

use serde::Serialize;
use tabled::Tabled;

use kidscare_core::error::AppError;
use kidscare_session::{GuardDecision, RouteGuard};

use crate::console::Console;
use crate::output;

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    path: String,
    screen: String,
    requires: String,
    #[tabled(rename = "for you")]
    access: String,
}

pub fn execute(console: &Console) -> Result<(), AppError> {
    let session = console.store.current();
    let table = console.navigator.table();
    let mut rows = Vec::new();

    for (from, to) in table.redirects() {
        rows.push(RouteRow {
            path: from.to_string(),
            screen: "-".to_string(),
            requires: "-".to_string(),
            access: format!("→ {to}"),
        });
    }
    for route in table.public_routes() {
        rows.push(RouteRow {
            path: route.pattern.as_str().to_string(),
            screen: route.screen.to_string(),
            requires: "-".to_string(),
            access: "open".to_string(),
        });
    }
    for subtree in table.subtrees() {
        let access = match RouteGuard::check(&session, subtree.allowed) {
            GuardDecision::Render => "open".to_string(),
            GuardDecision::Redirect { to, .. } => format!("→ {to}"),
        };
        for route in &subtree.routes {
            rows.push(RouteRow {
                path: route.pattern.as_str().to_string(),
                screen: route.screen.to_string(),
                requires: subtree.allowed.to_string(),
                access: access.clone(),
            });
        }
    }

    output::print_list(&rows, console.format, console.theme());
    Ok(())
}
