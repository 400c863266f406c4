//! `kidscare whoami`

use kidscare_core::error::AppError;
use kidscare_session::home_path;

use crate::console::Console;
use crate::output::{self, OutputFormat};

pub fn execute(console: &Console) -> Result<(), AppError> {
    let user = console.require_login()?;
    if console.format == OutputFormat::Json {
        output::print_record(&user, console.format);
        return Ok(());
    }
    output::print_kv("ID", &user.id.to_string());
    output::print_kv("Name", &user.name);
    output::print_kv("Email", &user.email);
    output::print_kv("Role", user.role.as_str());
    output::print_kv("Home", home_path(Some(user.role)));
    Ok(())
}
