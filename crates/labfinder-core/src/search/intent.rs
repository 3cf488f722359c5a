//! Single-slot cache for a search made before sign-in.

use std::sync::Arc;

use super::model::SearchIntent;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Key of the pending search in session storage.
pub const PENDING_SEARCH_KEY: &str = "pendingSearch";

/// Holds at most one [`SearchIntent`] in a session-scoped store.
///
/// Recording overwrites any earlier intent. Taking removes the slot, so an
/// intent is handed out at most once.
#[derive(Clone)]
pub struct IntentCache {
    backend: Arc<dyn KeyValueStore>,
}

impl IntentCache {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn record(&self, intent: &SearchIntent) -> Result<()> {
        let json = serde_json::to_string(intent)?;
        self.backend.set(PENDING_SEARCH_KEY, &json)?;
        tracing::debug!(test = %intent.test, location = %intent.location, "Pending search recorded");
        Ok(())
    }

    pub fn is_pending(&self) -> Result<bool> {
        Ok(self.backend.get(PENDING_SEARCH_KEY)?.is_some())
    }

    /// Removes and returns the pending intent.
    ///
    /// A malformed entry is discarded and logged, and `None` is returned.
    pub fn take(&self) -> Result<Option<SearchIntent>> {
        let Some(raw) = self.backend.get(PENDING_SEARCH_KEY)? else {
            return Ok(None);
        };
        self.backend.remove(PENDING_SEARCH_KEY)?;

        match serde_json::from_str(&raw) {
            Ok(intent) => Ok(Some(intent)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable pending search");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn test_take_consumes_once() {
        let cache = IntentCache::new(Arc::new(MemoryKeyValueStore::new()));
        cache.record(&SearchIntent::new("CBC", "Boston")).unwrap();
        assert!(cache.is_pending().unwrap());

        assert_eq!(
            cache.take().unwrap(),
            Some(SearchIntent::new("CBC", "Boston"))
        );
        assert_eq!(cache.take().unwrap(), None);
        assert!(!cache.is_pending().unwrap());
    }

    #[test]
    fn test_record_overwrites() {
        let cache = IntentCache::new(Arc::new(MemoryKeyValueStore::new()));
        cache.record(&SearchIntent::new("CBC", "Boston")).unwrap();
        cache.record(&SearchIntent::new("Lipid Panel", "Austin")).unwrap();
        assert_eq!(cache.take().unwrap().unwrap().test, "Lipid Panel");
    }

    #[test]
    fn test_malformed_entry_is_discarded() {
        let backend = Arc::new(MemoryKeyValueStore::with_entry(PENDING_SEARCH_KEY, "not json"));
        let cache = IntentCache::new(backend.clone());
        assert_eq!(cache.take().unwrap(), None);
        assert_eq!(backend.get(PENDING_SEARCH_KEY).unwrap(), None);
    }
}
