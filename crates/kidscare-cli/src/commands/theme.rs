//! `kidscare theme [light|dark]`

use clap::Args;

use kidscare_core::error::AppError;
use kidscare_core::types::Theme;

use crate::console::Console;
use crate::output;

/// Arguments for theme
#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// `light` or `dark`; omit to show the current theme
    pub theme: Option<Theme>,
}

pub fn execute(args: &ThemeArgs, console: &Console) -> Result<(), AppError> {
    match args.theme {
        Some(theme) => {
            console.store.set_theme(theme)?;
            output::print_success(&format!("Theme set to {theme}"));
        }
        None => output::print_kv("Theme", console.theme().as_str()),
    }
    Ok(())
}
