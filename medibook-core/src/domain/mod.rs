//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod appointment;
pub mod otp;
pub mod result;
mod session;
pub mod signup;
mod user;

pub use appointment::{Appointment, AppointmentStatus, BookingRequest};
pub use otp::OneTimeCode;
pub use session::Session;
pub use signup::{PendingSignup, SignupFlow, SignupForm, SignupRules, SignupStage, Verification};
pub use user::{User, UserProfile};
