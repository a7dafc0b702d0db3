//! Key-value preference stores
//!
//! `KeyValueStore` is the persistence boundary. Settings objects hold an
//! `Arc<dyn KeyValueStore>` so one store can back several of them, the way a
//! relaunched app reads the same user defaults as the previous run.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::PrefValue;

/// Storage abstraction for preferences.
///
/// Reads and writes are atomic per key. Writes never fail from the caller's
/// point of view; backends that persist report problems through the log.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: PrefValue);

    /// Remove `key` if present
    fn remove(&self, key: &str);

    /// All stored keys, sorted
    fn keys(&self) -> Vec<String>;
}

/// In-memory store that lives as long as its last handle.
///
/// Nothing is written anywhere; used by tests and by callers that want a
/// throwaway session.
#[derive(Debug, Default)]
pub struct EphemeralStore {
    values: RwLock<BTreeMap<String, PrefValue>>,
}

impl EphemeralStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for the common case of handing the store to settings.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KeyValueStore for EphemeralStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: PrefValue) {
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_set_get_remove() {
        let store = EphemeralStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("missing"), None);

        store.set("b", PrefValue::Bool(true));
        store.set("a", PrefValue::from("x"));
        store.set("a", PrefValue::Int(3));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), Some(PrefValue::Int(3)));
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);

        store.remove("a");
        store.remove("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_shared_handles_see_same_values() {
        let store = EphemeralStore::shared();
        let other: Arc<dyn KeyValueStore> = store.clone();

        other.set("k", PrefValue::from("v"));
        assert_eq!(store.get("k"), Some(PrefValue::from("v")));
    }
}
