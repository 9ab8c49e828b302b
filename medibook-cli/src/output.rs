//! Output formatting utilities

use std::time::Duration;

use anyhow::{bail, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use medibook_core::{Error, OperationResult};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Show a spinner for the configured artificial delay, then run `op`
///
/// The delay is a plain sleep and cannot be interrupted.
pub fn with_latency<T>(latency: Duration, message: &str, op: impl FnOnce() -> T) -> T {
    if latency.is_zero() {
        return op();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    std::thread::sleep(latency);
    spinner.finish_and_clear();

    op()
}

/// Report a core result either as JSON or through `render`
///
/// In JSON mode a failure is printed as an `OperationResult` and the
/// process exits with status 1. Field errors are listed one per line.
pub fn finish<T: Serialize>(
    result: medibook_core::Result<T>,
    json: bool,
    render: impl FnOnce(&T),
) -> Result<()> {
    match result {
        Ok(data) if json => {
            println!("{}", serde_json::to_string_pretty(&OperationResult::ok(data))?);
            Ok(())
        }
        Ok(data) => {
            render(&data);
            Ok(())
        }
        Err(e) if json => {
            let failed: OperationResult<T> = Err(e).into();
            println!("{}", serde_json::to_string_pretty(&failed)?);
            std::process::exit(1);
        }
        Err(Error::InvalidFields(fields)) => {
            for field in &fields {
                error(&format!("  {}", field));
            }
            bail!("Please correct the highlighted fields")
        }
        Err(e) => Err(e.into()),
    }
}
