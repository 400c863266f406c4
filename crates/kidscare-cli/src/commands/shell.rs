//! `kidscare shell`: interactive navigation.
//!
//! Each screen runs under its own cancellation token. Ctrl-C while a screen
//! is loading cancels that screen's requests and returns to the prompt.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_core::types::Theme;
use kidscare_session::{LOGIN_PATH, Resolution};

use crate::console::Console;
use crate::output;
use crate::screens::{self, Action};

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Open { path: String, fields: Vec<String>, delete: Option<i64> },
    Back,
    Reload,
    Login,
    Logout,
    Whoami,
    Routes,
    Theme(Option<Theme>),
    Help,
    Exit,
    Empty,
}

pub async fn execute(console: &mut Console) -> Result<(), AppError> {
    let start = if console.store.is_authenticated() {
        console.paths().dashboard()
    } else {
        LOGIN_PATH.to_string()
    };
    let resolution = console.navigator.navigate(&start);
    report(show(console, resolution, &Action::default()).await);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(console);
        let line = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
        let Some(line) = line else { break };

        let command = match parse(&line, console.navigator.current_path()) {
            Ok(command) => command,
            Err(e) => {
                output::print_error(&e.message);
                continue;
            }
        };
        match command {
            ShellCommand::Exit => break,
            ShellCommand::Empty => {}
            command => report(run(console, command).await),
        }
    }
    Ok(())
}

async fn run(console: &mut Console, command: ShellCommand) -> AppResult<()> {
    match command {
        ShellCommand::Open { path, fields, delete } => {
            let resolution = console.navigator.navigate(&path);
            show(console, resolution, &Action { fields, delete }).await
        }
        ShellCommand::Back => match console.navigator.back() {
            Some(resolution) => show(console, resolution, &Action::default()).await,
            None => {
                output::print_warning("No earlier screen");
                Ok(())
            }
        },
        ShellCommand::Reload => match console.navigator.reload() {
            Some(resolution) => show(console, resolution, &Action::default()).await,
            None => Ok(()),
        },
        ShellCommand::Login => {
            let email = super::text_or_prompt(&None, "Email")?;
            let password = super::secret_or_prompt(&None, "Password", false)?;
            let home = super::login::login(console, &email, &password).await?;
            let resolution = console.navigator.navigate(home);
            show(console, resolution, &Action::default()).await
        }
        ShellCommand::Logout => {
            super::logout::execute(console)?;
            // The guard re-runs against the now anonymous session.
            match console.navigator.reload() {
                Some(resolution) => show(console, resolution, &Action::default()).await,
                None => Ok(()),
            }
        }
        ShellCommand::Whoami => super::whoami::execute(console),
        ShellCommand::Routes => super::routes::execute(console),
        ShellCommand::Theme(theme) => {
            super::theme::execute(&super::theme::ThemeArgs { theme }, console)
        }
        ShellCommand::Help => {
            print_help();
            Ok(())
        }
        ShellCommand::Exit | ShellCommand::Empty => Ok(()),
    }
}

/// Render a screen, cancelling its requests on Ctrl-C.
async fn show(console: &mut Console, resolution: Resolution, action: &Action) -> AppResult<()> {
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Ctrl-C, cancelling screen");
                cancel.cancel();
            }
        }
    });

    let result = screens::render(console, resolution, action, &cancel).await;
    watcher.abort();
    result
}

fn report(result: AppResult<()>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => output::print_warning("Cancelled"),
        Err(e) => output::print_error(&e.message),
    }
}

fn prompt(console: &Console) {
    let path = console.navigator.current_path().unwrap_or(LOGIN_PATH);
    print!("kidscare {path}> ");
    let _ = std::io::stdout().flush();
}

fn print_help() {
    output::print_kv("<path> [k=v ...]", "open a screen, with form fields");
    output::print_kv("open <path> [k=v ...]", "same as above");
    output::print_kv("delete <id>", "delete a record on the current list");
    output::print_kv("back", "previous screen");
    output::print_kv("reload", "render the current screen again");
    output::print_kv("login / logout", "start or end a session");
    output::print_kv("whoami", "current user");
    output::print_kv("routes", "route table for your role");
    output::print_kv("theme [light|dark]", "show or set the theme");
    output::print_kv("exit", "leave the shell");
}

/// Parse a shell line; `current` is the path `delete` applies to.
fn parse(line: &str, current: Option<&str>) -> AppResult<ShellCommand> {
    let words = split_words(line)?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(ShellCommand::Empty);
    };

    let command = match head.as_str() {
        "exit" | "quit" => ShellCommand::Exit,
        "help" | "?" => ShellCommand::Help,
        "back" => ShellCommand::Back,
        "reload" => ShellCommand::Reload,
        "login" => ShellCommand::Login,
        "logout" => ShellCommand::Logout,
        "whoami" => ShellCommand::Whoami,
        "routes" => ShellCommand::Routes,
        "theme" => ShellCommand::Theme(rest.first().map(|t| t.parse()).transpose()?),
        "open" => {
            let (path, fields) = rest
                .split_first()
                .ok_or_else(|| AppError::validation("open needs a path"))?;
            ShellCommand::Open {
                path: path.clone(),
                fields: fields.to_vec(),
                delete: None,
            }
        }
        "delete" => {
            let raw = rest
                .first()
                .ok_or_else(|| AppError::validation("delete needs a record id"))?;
            let id = raw
                .parse::<i64>()
                .map_err(|_| AppError::validation(format!("Invalid record id '{raw}'")))?;
            let path = current.ok_or_else(|| AppError::validation("Open a list screen first"))?;
            ShellCommand::Open {
                path: path.to_string(),
                fields: Vec::new(),
                delete: Some(id),
            }
        }
        path if path.starts_with('/') => ShellCommand::Open {
            path: path.to_string(),
            fields: rest.to_vec(),
            delete: None,
        },
        other => {
            return Err(AppError::validation(format!(
                "Unknown command '{other}'. Type `help`."
            )));
        }
    };
    Ok(command)
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> AppResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    words.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if quoted {
        return Err(AppError::validation("Unclosed quote"));
    }
    if started {
        words.push(current);
    }
    Ok(words)
}
