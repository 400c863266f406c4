//! `kidscare profile`

use clap::Args;

use kidscare_client::ProfileFlow;
use kidscare_core::error::AppError;
use kidscare_session::Section;

use crate::console::Console;
use crate::output;

/// Arguments for profile
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// New display name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New email
    #[arg(short, long)]
    pub email: Option<String>,
}

pub async fn execute(args: &ProfileArgs, console: &mut Console) -> Result<(), AppError> {
    console.require_login()?;
    let settings = console.paths().section(Section::Settings);
    console.enter(&settings)?;

    if args.name.is_none() && args.email.is_none() {
        let user = console.require_login()?;
        output::print_record(&user, console.format);
        return Ok(());
    }

    let flow = ProfileFlow::new(console.auth(), console.store.clone());
    let user = flow
        .update_profile(args.name.clone(), args.email.clone())
        .await?;
    output::print_success(&format!("Profile updated: {} <{}>", user.name, user.email));
    Ok(())
}
