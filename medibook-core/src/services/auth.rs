//! Auth service - session restore, login and logout

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Session, User};
use crate::services::logging::{log_quietly, LogEvent, LoggingService};
use crate::services::StorageRepository;

/// Auth service
///
/// Only one account is remembered at a time: a login is checked against
/// the last persisted record, not against every registered user.
pub struct AuthService {
    repository: Arc<StorageRepository>,
    logger: Option<Arc<LoggingService>>,
}

impl AuthService {
    pub fn new(repository: Arc<StorageRepository>, logger: Option<Arc<LoggingService>>) -> Self {
        Self { repository, logger }
    }

    /// Load the stored active user into the session, if any
    pub fn restore_session(&self, session: &mut Session) -> Result<Option<User>> {
        let user = self.repository.current_user()?;
        session.current_user = user.clone();
        Ok(user)
    }

    /// Check a credential pair against the last persisted user
    ///
    /// Both fields are trimmed and required. A mismatch never says which
    /// field was wrong.
    pub fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::validation("Please fill in all fields"));
        }

        let user = match self.repository.last_persisted_user()? {
            Some(user) if user.has_credentials(email, password) => user,
            _ => {
                log_quietly(
                    self.logger.as_deref(),
                    LogEvent::new("login_failed").with_subject(email),
                );
                return Err(Error::InvalidCredentials);
            }
        };

        self.repository.set_current_user(&user)?;
        session.current_user = Some(user.clone());
        log_quietly(
            self.logger.as_deref(),
            LogEvent::new("login_succeeded").with_subject(email),
        );
        Ok(user)
    }

    /// Forget the active user, in the session and in storage
    ///
    /// Returns the user that was logged out, `None` if nobody was.
    pub fn logout(&self, session: &mut Session) -> Result<Option<User>> {
        self.repository.clear_current_user()?;
        let user = session.current_user.take();
        if let Some(user) = &user {
            log_quietly(
                self.logger.as_deref(),
                LogEvent::new("logged_out").with_subject(&user.email),
            );
        }
        Ok(user)
    }

    /// Every registered user
    pub fn list_users(&self) -> Result<Vec<User>> {
        self.repository.users()
    }
}
