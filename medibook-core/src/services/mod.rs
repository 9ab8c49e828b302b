//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod booking;
pub mod logging;
pub mod migration;
mod signup;
mod storage;

pub use auth::AuthService;
pub use booking::BookingService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use signup::SignupService;
pub use storage::StorageRepository;
