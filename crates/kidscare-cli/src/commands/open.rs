//! `kidscare open <path>`

use clap::Args;
use tokio_util::sync::CancellationToken;

use kidscare_core::error::AppError;

use crate::console::Console;
use crate::screens::{self, Action};

/// Arguments for open
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Console path, e.g. /staff/attendance/new
    pub path: String,
    /// Form field for create, edit and settings screens
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
    /// Delete this record id from a list screen
    #[arg(long, value_name = "ID")]
    pub delete: Option<i64>,
}

pub async fn execute(args: &OpenArgs, console: &mut Console) -> Result<(), AppError> {
    let action = Action {
        fields: args.fields.clone(),
        delete: args.delete,
    };
    let resolution = console.navigator.navigate(&args.path);
    screens::render(console, resolution, &action, &CancellationToken::new()).await
}
