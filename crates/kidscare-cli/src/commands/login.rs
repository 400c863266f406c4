//! `kidscare login`

use clap::Args;
use tokio_util::sync::CancellationToken;

use kidscare_client::LoginFlow;
use kidscare_core::error::AppError;

use crate::console::Console;
use crate::output;
use crate::screens::{self, Action};

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (prompted if omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Log in, then open the role's home screen.
pub async fn execute(args: &LoginArgs, console: &mut Console) -> Result<(), AppError> {
    let email = super::text_or_prompt(&args.email, "Email")?;
    let password = super::secret_or_prompt(&args.password, "Password", false)?;

    let home = login(console, &email, &password).await?;
    let resolution = console.navigator.navigate(home);
    screens::render(console, resolution, &Action::default(), &CancellationToken::new()).await
}

/// Run the login flow and report who logged in. Returns the home path.
pub(crate) async fn login(
    console: &Console,
    email: &str,
    password: &str,
) -> Result<&'static str, AppError> {
    let flow = LoginFlow::new(console.auth(), console.store.clone());
    let home = flow.login(email, password).await?;

    if let Some(user) = console.store.user() {
        output::print_success(&format!("Logged in as {} ({})", user.name, user.role));
    }
    Ok(home)
}
