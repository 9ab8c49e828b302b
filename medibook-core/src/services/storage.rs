//! Storage repository - typed collections over the key-value store

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Appointment, User};
use crate::ports::{KeyValueStore, StorageKey};
use crate::services::logging::{log_quietly, LogEvent, LoggingService};

/// Typed access to the three stored collections
///
/// Every value is a JSON document. A document that no longer parses is
/// removed, the recovery is logged, and the read behaves as if the key had
/// never been written.
pub struct StorageRepository {
    store: Arc<dyn KeyValueStore>,
    logger: Option<Arc<LoggingService>>,
}

impl StorageRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    fn report_corruption(&self, key: StorageKey, err: &serde_json::Error) {
        eprintln!(
            "[medibook] Cleared unreadable value under '{}': {}",
            key.as_str(),
            err
        );
        log_quietly(
            self.logger.as_deref(),
            LogEvent::new("storage_entry_recovered")
                .with_subject(key.as_str())
                .with_error(err.to_string()),
        );
    }

    /// Read and decode one key
    pub fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>> {
        let Some(raw) = self.store.get_item(key.as_str())? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.store.remove_item(key.as_str())?;
                self.report_corruption(key, &e);
                Ok(None)
            }
        }
    }

    /// Encode and overwrite one key
    pub fn write<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(key.as_str(), &raw)
    }

    pub fn clear(&self, key: StorageKey) -> Result<()> {
        self.store.remove_item(key.as_str())
    }

    /// Read a list; absent or unreadable lists are empty
    pub fn list<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    /// Append to a list in one atomic read-modify-write
    ///
    /// `prepare` may adjust the item against the current list before it is
    /// pushed. Returns the stored item and the new list length.
    pub fn append_with<T, F>(&self, key: StorageKey, item: T, mut prepare: F) -> Result<(T, usize)>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnMut(&[T], &mut T),
    {
        let mut stored = None;
        let mut corruption = None;

        self.store.update_item(key.as_str(), &mut |current: Option<String>| -> Result<Option<String>> {
            let mut items: Vec<T> = match current {
                None => Vec::new(),
                Some(raw) => match serde_json::from_str(&raw) {
                    Ok(items) => items,
                    Err(e) => {
                        corruption = Some(e);
                        Vec::new()
                    }
                },
            };
            let mut item = item.clone();
            prepare(&items, &mut item);
            items.push(item.clone());
            let len = items.len();
            let raw = serde_json::to_string(&items)?;
            stored = Some((item, len));
            Ok(Some(raw))
        })?;

        if let Some(e) = corruption {
            self.report_corruption(key, &e);
        }

        // update_item only returns Ok after running the closure to completion
        stored.ok_or_else(|| Error::database("Append did not run"))
    }

    /// Append to a list as-is
    pub fn append<T>(&self, key: StorageKey, item: T) -> Result<usize>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        self.append_with(key, item, |_, _| {}).map(|(_, len)| len)
    }

    // === Users ===

    /// The active user (`medibook_user`)
    pub fn current_user(&self) -> Result<Option<User>> {
        self.read(StorageKey::User)
    }

    pub fn set_current_user(&self, user: &User) -> Result<()> {
        self.write(StorageKey::User, user)
    }

    pub fn clear_current_user(&self) -> Result<()> {
        self.clear(StorageKey::User)
    }

    /// Every registered user, in registration order
    pub fn users(&self) -> Result<Vec<User>> {
        self.list(StorageKey::Users)
    }

    pub fn append_user(&self, user: &User) -> Result<usize> {
        self.append(StorageKey::Users, user.clone())
    }

    /// The record a login is checked against
    ///
    /// The active user if one is stored, otherwise the most recently
    /// registered one.
    pub fn last_persisted_user(&self) -> Result<Option<User>> {
        match self.current_user()? {
            Some(user) => Ok(Some(user)),
            None => Ok(self.users()?.pop()),
        }
    }

    // === Appointments ===

    pub fn appointments(&self) -> Result<Vec<Appointment>> {
        self.list(StorageKey::Appointments)
    }

    /// Append an appointment, keeping ids strictly increasing
    ///
    /// Ids are creation timestamps; two bookings in the same millisecond
    /// would otherwise collide.
    pub fn append_appointment(&self, appointment: Appointment) -> Result<Appointment> {
        self.append_with(StorageKey::Appointments, appointment, |existing, appt| {
            if let Some(last) = existing.iter().map(|a| a.id).max() {
                if appt.id <= last {
                    appt.id = last.saturating_add(1);
                }
            }
        })
        .map(|(appt, _)| appt)
    }
}
