//! `kidscare reset-password <user-id>`

use clap::Args;

use kidscare_core::error::AppError;
use kidscare_core::types::Role;
use kidscare_session::{PathResolver, Section};

use crate::console::Console;
use crate::output;

/// Arguments for reset-password
#[derive(Debug, Args)]
pub struct ResetPasswordArgs {
    /// Account to reset
    pub user_id: i64,
    /// New password (prompted if omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Reset a password from the admin user management screen.
pub async fn execute(args: &ResetPasswordArgs, console: &mut Console) -> Result<(), AppError> {
    console.require_login()?;
    let edit = PathResolver::for_role(Some(Role::Admin)).edit_item(Section::Users, args.user_id);
    console.enter(&edit)?;

    let password = super::secret_or_prompt(&args.password, "New password", true)?;
    let detail = console
        .auth()
        .admin_reset_password(args.user_id, &password)
        .await?;
    output::print_success(&detail);
    Ok(())
}
