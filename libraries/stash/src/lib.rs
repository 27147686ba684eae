//! This is a library for keeping small pieces of app state in a local key-value area
//! (the browser's `localStorage`, or memory when there is no browser).
//! It was created for the flashcards frontend, so it doesn't include much that was not needed for that project.
//!
//! Persistence strategy:
//! 1. Each piece of state lives under its own fixed key, as a short text blob.
//! 2. On startup the blob is read once and *reconciled* against a seed (the state the app would have if nothing was stored).
//!    A missing or corrupt blob never fails the load: it just means "use the seed".
//! 3. After every mutation the whole state is written back. Writes are fire-and-forget: a failed write
//!    (e.g. the quota is full) leaves the in-memory state correct, and the next mutation writes again.

#[cfg(target_arch = "wasm32")]
#[cfg(feature = "local-storage")]
pub mod local_storage;

pub mod memory;

pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
#[cfg(feature = "local-storage")]
pub use local_storage::LocalStorage;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage quota exceeded while writing {key} ({needed} bytes needed, limit {limit:?})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: Option<usize>,
    },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A synchronous string-to-string storage area.
///
/// Methods take `&self` because the browser's storage is a shared handle; implementations
/// that need to mutate use interior mutability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// State that can be written to a [`KeyValueStore`] and rebuilt from it.
pub trait Persisted: Sized {
    /// What the state is rebuilt from when nothing usable was stored.
    type Seed;

    /// Encode the durable subset of the state.
    fn serialize(&self) -> Result<String, serde_json::Error>;

    /// Rebuild the state from a stored blob (if any) and the seed.
    /// Must never fail: anything unusable in `raw` falls back to the seed.
    fn reconcile(raw: Option<&str>, seed: Self::Seed) -> Self;
}

/// Read `key` and reconcile it against `seed`. Read errors are logged and treated as "nothing stored".
pub fn load<P: Persisted>(store: &dyn KeyValueStore, key: &str, seed: P::Seed) -> P {
    let raw = store
        .get(key)
        .inspect_err(|e| log::warn!("Failed to read {key} from storage: {e}"))
        .ok()
        .flatten();
    P::reconcile(raw.as_deref(), seed)
}

/// Serialize `state` and write it under `key`.
pub fn save<P: Persisted>(store: &dyn KeyValueStore, key: &str, state: &P) -> Result<(), StoreError> {
    let encoded = state.serialize()?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Counter {
        count: u32,
    }

    impl Persisted for Counter {
        type Seed = u32;

        fn serialize(&self) -> Result<String, serde_json::Error> {
            serde_json::to_string(self)
        }

        fn reconcile(raw: Option<&str>, seed: u32) -> Self {
            raw.and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or(Counter { count: seed })
        }
    }

    #[test]
    fn test_load_missing_key_uses_seed() {
        let store = MemoryStore::new();
        let counter: Counter = load(&store, "counter", 7);
        assert_eq!(counter, Counter { count: 7 });
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save(&store, "counter", &Counter { count: 3 }).unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some(r#"{"count":3}"#));

        let counter: Counter = load(&store, "counter", 0);
        assert_eq!(counter, Counter { count: 3 });
    }

    #[test]
    fn test_load_corrupt_value_uses_seed() {
        let store = MemoryStore::with_entries([("counter", "{not json")]);
        let counter: Counter = load(&store, "counter", 1);
        assert_eq!(counter, Counter { count: 1 });
    }

    #[test]
    fn test_save_over_quota_reports_error_and_keeps_old_value() {
        let store = MemoryStore::with_quota(20);
        save(&store, "counter", &Counter { count: 1 }).unwrap();

        let result = save(&store, "counter", &Counter { count: 1_000_000_000 });
        assert!(matches!(result, Err(StoreError::QuotaExceeded { .. })));
        assert_eq!(store.get("counter").unwrap().as_deref(), Some(r#"{"count":1}"#));
    }
}
