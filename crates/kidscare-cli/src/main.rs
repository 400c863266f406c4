//! KidsCare console entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use kidscare_core::config::ConsoleConfig;
use kidscare_core::error::AppError;

mod commands;
mod console;
mod output;
mod screens;
#[cfg(test)]
mod testing;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e.message));
            std::process::exit(2);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(config).await {
        output::print_error(&e.message);
        std::process::exit(1);
    }
}

/// Load layered configuration for the environment named by `KIDSCARE_ENV`.
fn load_configuration(cli: &Cli) -> Result<ConsoleConfig, AppError> {
    let env = std::env::var("KIDSCARE_ENV").unwrap_or_else(|_| "development".to_string());
    ConsoleConfig::load(&env, cli.config.as_deref())
}

/// Initialize tracing. Logs go to stderr so screen output stays clean.
fn init_logging(config: &ConsoleConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
