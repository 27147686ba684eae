use wasm_bindgen::{JsCast, JsValue};

use crate::{KeyValueStore, StoreError};

const QUOTA_EXCEEDED: &str = "QuotaExceededError";

/// `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        // `local_storage()` throws when storage is disabled (e.g. some private browsing modes)
        let storage = window
            .local_storage()
            .map_err(backend_error)?
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(backend_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| {
            let is_quota = e
                .dyn_ref::<web_sys::DomException>()
                .is_some_and(|exception| exception.name() == QUOTA_EXCEEDED);
            if is_quota {
                StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed: key.len() + value.len(),
                    limit: None,
                }
            } else {
                backend_error(e)
            }
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(backend_error)
    }
}

fn backend_error(e: JsValue) -> StoreError {
    StoreError::Backend(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        let store = LocalStorage::open().unwrap();
        store.set("stash-test", "hello").unwrap();
        assert_eq!(store.get("stash-test").unwrap().as_deref(), Some("hello"));
        store.remove("stash-test").unwrap();
        assert_eq!(store.get("stash-test").unwrap(), None);
    }
}
