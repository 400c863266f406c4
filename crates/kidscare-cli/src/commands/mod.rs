//! CLI command definitions and dispatch.

pub mod login;
pub mod logout;
pub mod open;
pub mod password;
pub mod profile;
pub mod routes;
pub mod shell;
pub mod theme;
pub mod users;
pub mod whoami;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kidscare_core::config::ConsoleConfig;
use kidscare_core::error::AppError;

use crate::console::Console;
use crate::output::OutputFormat;

/// KidsCare: childcare administration console
#[derive(Debug, Parser)]
#[command(name = "kidscare", version, about, long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over config/
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and open your dashboard
    Login(login::LoginArgs),
    /// Log out and forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Navigate to a console path and render its screen
    Open(open::OpenArgs),
    /// List the routes and what the current session may open
    Routes,
    /// Update your name or email
    Profile(profile::ProfileArgs),
    /// Change your password
    Password(password::PasswordArgs),
    /// Reset another user's password (admin)
    ResetPassword(users::ResetPasswordArgs),
    /// Show or set the color theme
    Theme(theme::ThemeArgs),
    /// Interactive navigation
    Shell,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: ConsoleConfig) -> Result<(), AppError> {
        let mut console = Console::open(&config, self.ephemeral, self.format, self.yes)?;

        match &self.command {
            Commands::Login(args) => login::execute(args, &mut console).await,
            Commands::Logout => logout::execute(&mut console),
            Commands::Whoami => whoami::execute(&console),
            Commands::Open(args) => open::execute(args, &mut console).await,
            Commands::Routes => routes::execute(&console),
            Commands::Profile(args) => profile::execute(args, &mut console).await,
            Commands::Password(args) => password::execute(args, &mut console).await,
            Commands::ResetPassword(args) => users::execute(args, &mut console).await,
            Commands::Theme(args) => theme::execute(args, &console),
            Commands::Shell => shell::execute(&mut console).await,
        }
    }
}

/// Prompt for text unless it was given on the command line.
pub(crate) fn text_or_prompt(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}

/// Prompt for a secret unless it was given on the command line.
pub(crate) fn secret_or_prompt(
    value: &Option<String>,
    prompt: &str,
    confirm: bool,
) -> Result<String, AppError> {
    if let Some(v) = value {
        return Ok(v.clone());
    }
    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }
    input
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
