//! Table and JSON output for console screens.

use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use kidscare_core::types::Theme;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of rows in the selected format.
///
/// The theme picks the table border style.
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat, theme: Theme) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No records found.");
                return;
            }
            let mut table = Table::new(items);
            match theme {
                Theme::Dark => table.with(Style::rounded()),
                Theme::Light => table.with(Style::ascii()),
            };
            println!("{table}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print one record: `key: value` lines, or JSON.
///
/// Nested lists are left out of the table form; screens print them
/// separately.
pub fn print_record<T: Serialize>(item: &T, format: OutputFormat) {
    let value = serde_json::to_value(item).unwrap_or(Value::Null);
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        OutputFormat::Table => match value {
            Value::Object(map) => {
                for (key, field) in &map {
                    match field {
                        Value::Array(_) => {}
                        Value::Null => print_kv(key, "-"),
                        Value::String(s) => print_kv(key, s),
                        Value::Object(inner) => {
                            let summary = inner
                                .get("name")
                                .and_then(Value::as_str)
                                .map(str::to_string)
                                .unwrap_or_else(|| field.to_string());
                            print_kv(key, &summary);
                        }
                        other => print_kv(key, &other.to_string()),
                    }
                }
            }
            other => println!("{other}"),
        },
    }
}

/// Print a screen heading.
pub fn print_heading(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(title.chars().count()));
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a navigation hint
pub fn print_redirect(to: &str) {
    println!("→ {to}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
