//! Per-process session context

use super::signup::SignupFlow;
use super::user::User;

/// Everything a front end holds between actions
///
/// The signup flow, including any pending signup and its code, lives here
/// and nowhere else: dropping the session discards it.
#[derive(Debug, Default)]
pub struct Session {
    pub current_user: Option<User>,
    pub signup: SignupFlow,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Greeting shown for the active user
    pub fn greeting(&self) -> Option<String> {
        self.current_user
            .as_ref()
            .map(|user| format!("Hello, {}", user.first_name))
    }
}
