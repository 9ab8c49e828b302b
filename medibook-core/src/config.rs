//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "app": { "simulatedLatencyMs": 0 },
//!   "signup": { "minPasswordLength": 6, "minPhoneDigits": 10 }
//! }
//! ```
//! Fields this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::SignupRules;

/// Environment variable overriding `app.simulatedLatencyMs`
pub const LATENCY_ENV_VAR: &str = "MEDIBOOK_LATENCY_MS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    signup: SignupRules,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    simulated_latency_ms: u64,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// MediBook configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub signup: SignupRules,
    /// Artificial delay a front end shows before reporting a result
    pub simulated_latency_ms: u64,
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or unreadable settings file yields the defaults. The
    /// latency can be overridden with `MEDIBOOK_LATENCY_MS`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let simulated_latency_ms = latency_override().unwrap_or(raw.app.simulated_latency_ms);

        Ok(Self {
            signup: raw.signup,
            simulated_latency_ms,
        })
    }

    /// Save config to the data directory
    ///
    /// A latency equal to the environment override is not written back.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut settings = read_settings(data_dir)?;

        if latency_override() != Some(self.simulated_latency_ms) {
            settings.app.simulated_latency_ms = self.simulated_latency_ms;
        }
        settings.signup = self.signup;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join("settings.json"), content)?;
        Ok(())
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

fn latency_override() -> Option<u64> {
    std::env::var(LATENCY_ENV_VAR)
        .ok()
        .and_then(|v| v.trim().parse().ok())
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
