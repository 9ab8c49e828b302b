//! Storage port - durable key-value store abstraction

use crate::domain::result::Result;

/// Fixed keys of the stored collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The active user's full record
    User,
    /// Every registered user, append-only
    Users,
    /// Every booked appointment, append-only
    Appointments,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::User => "medibook_user",
            StorageKey::Users => "medibook_users",
            StorageKey::Appointments => "medibook_appointments",
        }
    }
}

/// Durable string-to-string store
///
/// Values are opaque strings (JSON in practice). Implementations must be
/// safe to share between threads.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All stored keys, sorted
    fn keys(&self) -> Result<Vec<String>>;

    /// Atomic read-modify-write of one key
    ///
    /// `update` receives the current value and returns the new one
    /// (`None` removes the key). No other writer can interleave. If
    /// `update` fails, the stored value is left untouched.
    fn update_item(
        &self,
        key: &str,
        update: &mut dyn FnMut(Option<String>) -> Result<Option<String>>,
    ) -> Result<()>;
}
