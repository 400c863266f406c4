//! `kidscare password`

use clap::Args;

use kidscare_client::ProfileFlow;
use kidscare_core::error::AppError;
use kidscare_session::Section;

use crate::console::Console;
use crate::output;

/// Arguments for password
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Current password (prompted if omitted)
    #[arg(long)]
    pub current: Option<String>,
    /// New password (prompted if omitted)
    #[arg(long)]
    pub new: Option<String>,
}

pub async fn execute(args: &PasswordArgs, console: &mut Console) -> Result<(), AppError> {
    console.require_login()?;
    let settings = console.paths().section(Section::Settings);
    console.enter(&settings)?;

    let current = super::secret_or_prompt(&args.current, "Current password", false)?;
    let new = super::secret_or_prompt(&args.new, "New password", true)?;
    if current == new {
        return Err(AppError::validation(
            "New password must differ from the current one",
        ));
    }

    let flow = ProfileFlow::new(console.auth(), console.store.clone());
    let detail = flow.change_password(&current, &new).await?;
    output::print_success(&detail);
    Ok(())
}
