//! CLI command implementations

pub mod appointments;
pub mod auth;
pub mod logs;
pub mod settings;
pub mod signup;
pub mod users;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use medibook_core::{EntryPoint, LoggingService, MedibookContext};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV_VAR: &str = "MEDIBOOK_DIR";

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".medibook"))
        .ok_or_else(|| anyhow!("Could not find home directory; set {}", DATA_DIR_ENV_VAR))
}

/// Open the store and wire up the services
pub fn get_context(logger: &Option<Arc<LoggingService>>) -> Result<MedibookContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    MedibookContext::new(&data_dir, logger.clone()).context("Failed to initialize medibook context")
}
