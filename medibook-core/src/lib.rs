//! MediBook Core - accounts and appointment booking
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (User, SignupFlow, Appointment, Session)
//! - **ports**: Trait definitions for external dependencies (KeyValueStore)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::duckdb::DuckDbStore;
use config::Config;
use ports::KeyValueStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, FieldError, OperationResult, Result};
pub use domain::{
    Appointment, AppointmentStatus, BookingRequest, OneTimeCode, Session, SignupForm,
    SignupRules, SignupStage, User, UserProfile, Verification,
};
pub use services::{EntryPoint, LogEntry, LogEvent, LoggingService};

/// File name of the key-value store inside the data directory
pub const STORE_FILENAME: &str = "medibook.duckdb";

/// Main context for MediBook operations
///
/// Holds the configuration, the store and all services. Per-user state
/// (who is logged in, any pending signup) lives in a separate [`Session`].
pub struct MedibookContext {
    pub config: Config,
    pub repository: Arc<StorageRepository>,
    pub auth_service: AuthService,
    pub signup_service: SignupService,
    pub booking_service: BookingService,
}

impl MedibookContext {
    /// Open the store in `data_dir` and wire up the services
    pub fn new(data_dir: &Path, logger: Option<Arc<LoggingService>>) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let store = DuckDbStore::open(&data_dir.join(STORE_FILENAME))?;
        store.ensure_schema()?;

        Ok(Self::with_store(config, Arc::new(store), logger))
    }

    /// Wire up the services over any store
    pub fn with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        let mut repository = StorageRepository::new(store);
        if let Some(logger) = &logger {
            repository = repository.with_logger(Arc::clone(logger));
        }
        let repository = Arc::new(repository);

        let auth_service = AuthService::new(Arc::clone(&repository), logger.clone());
        let signup_service =
            SignupService::new(Arc::clone(&repository), config.signup, logger.clone());
        let booking_service = BookingService::new(Arc::clone(&repository), logger);

        Self {
            config,
            repository,
            auth_service,
            signup_service,
            booking_service,
        }
    }

    /// A session with the stored active user restored
    pub fn restore_session(&self) -> Result<Session> {
        let mut session = Session::new();
        self.auth_service.restore_session(&mut session)?;
        Ok(session)
    }
}
