//! `kidscare logout`

use kidscare_core::error::AppError;
use kidscare_session::LOGIN_PATH;

use crate::console::Console;
use crate::output;

pub fn execute(console: &mut Console) -> Result<(), AppError> {
    let was_logged_in = console.store.is_authenticated();
    console.store.logout();
    console.navigator.navigate(LOGIN_PATH);

    if was_logged_in {
        output::print_success("Logged out");
    } else {
        output::print_warning("No active session");
    }
    Ok(())
}
