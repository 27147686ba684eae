use std::rc::Rc;

use stash::{KeyValueStore, MemoryStore};

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The browser's localStorage, or an in-memory store if the page isn't allowed to use it
/// (private browsing, sandboxed iframes). In the latter case the app works but forgets on reload.
pub(crate) fn browser_store() -> Rc<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    match stash::LocalStorage::open() {
        Ok(storage) => return Rc::new(storage),
        Err(e) => log::warn!("localStorage is unavailable, progress will not be saved: {e}"),
    }

    Rc::new(MemoryStore::new())
}
