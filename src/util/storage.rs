//! Browser `localStorage` access.
//!
//! Outside the browser nothing is stored, so callers need no cfg gates.

/// Raw string stored under `key`, if any.
#[must_use]
pub fn load_item(key: &str) -> Option<String> {
    #[cfg(feature = "browser")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "browser"))]
    {
        log::trace!("no localStorage for {key}");
        None
    }
}
