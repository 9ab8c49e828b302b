//! Settings command - show or update settings.json

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::json;

use medibook_core::config::{Config, LATENCY_ENV_VAR};

use super::get_data_dir;
use crate::output;

#[derive(Args)]
pub struct SettingsArgs {
    /// Minimum password length for new accounts
    #[arg(long)]
    pub min_password_length: Option<usize>,
    /// Minimum number of digits in a phone number
    #[arg(long)]
    pub min_phone_digits: Option<usize>,
    /// Artificial delay before results are shown, in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SettingsArgs) -> Result<()> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    let mut config = Config::load(&data_dir)?;
    let mut changed = false;

    if let Some(n) = args.min_password_length {
        config.signup.min_password_length = n;
        changed = true;
    }
    if let Some(n) = args.min_phone_digits {
        config.signup.min_phone_digits = n;
        changed = true;
    }
    if let Some(ms) = args.latency_ms {
        config.simulated_latency_ms = ms;
        changed = true;
    }

    if changed {
        config.save(&data_dir)?;
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "signup": config.signup,
                "simulatedLatencyMs": config.simulated_latency_ms,
                "updated": changed,
            }))?
        );
        return Ok(());
    }

    if changed {
        output::success("Settings saved");
    }

    println!("{}", "Settings".bold());
    let mut table = output::create_table();
    table.add_row(vec![
        "Minimum password length",
        &config.signup.min_password_length.to_string(),
    ]);
    table.add_row(vec![
        "Minimum phone digits",
        &config.signup.min_phone_digits.to_string(),
    ]);
    table.add_row(vec![
        "Simulated latency",
        &format!("{} ms", config.simulated_latency_ms),
    ]);
    println!("{}", table);

    if std::env::var(LATENCY_ENV_VAR).is_ok() {
        output::warning(&format!("Latency is overridden by {}", LATENCY_ENV_VAR));
    }

    Ok(())
}
