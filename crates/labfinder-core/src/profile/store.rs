//! Profile Store: the durable single-record slot holding the user profile.

use std::sync::Arc;

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::user::UserProfile;

/// Key under which the serialized profile lives.
pub const PROFILE_KEY: &str = "userProfile";

/// Reads and writes the one `userProfile` record of a durable
/// [`KeyValueStore`].
#[derive(Clone)]
pub struct ProfileStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Returns the raw stored record, if any.
    pub fn read_raw(&self) -> Result<Option<String>> {
        self.backend.get(PROFILE_KEY)
    }

    /// Loads and parses the stored profile.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profile))`: a well-formed record exists
    /// - `Ok(None)`: no record
    /// - `Err`: the backend failed or the record does not parse
    pub fn load(&self) -> Result<Option<UserProfile>> {
        match self.read_raw()? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes `profile` and replaces the stored record.
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.backend.set(PROFILE_KEY, &json)
    }

    /// Removes the stored record. Succeeds when nothing is stored.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(PROFILE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Jo".to_string(),
            age: 31,
            email: "jo@x.com".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    #[test]
    fn test_save_writes_plain_json_under_profile_key() {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let store = ProfileStore::new(backend.clone());
        store.save(&profile()).unwrap();

        let raw = backend.get(PROFILE_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"{"name":"Jo","age":31,"email":"jo@x.com","phone":"5551234567"}"#
        );
        assert_eq!(store.load().unwrap(), Some(profile()));
    }

    #[test]
    fn test_load_malformed_is_error() {
        let backend = Arc::new(MemoryKeyValueStore::with_entry(PROFILE_KEY, "{"));
        let store = ProfileStore::new(backend);
        assert!(store.load().unwrap_err().is_serialization());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = ProfileStore::new(Arc::new(MemoryKeyValueStore::new()));
        store.clear().unwrap();
        store.save(&profile()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
