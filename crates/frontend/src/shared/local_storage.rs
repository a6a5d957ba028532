//! JSON helpers over `window.localStorage`
//!
//! Write errors are ignored: storage is a convenience cache, the in-memory
//! state stays authoritative.

use serde::{de::DeserializeOwned, Serialize};
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Parse a stored JSON value; `None` for malformed payloads
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}

pub fn read_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = get_local_storage()?;
    let raw = storage.get_item(key).ok()??;
    match decode_json(&raw) {
        Some(value) => Some(value),
        None => {
            log::warn!("Discarding corrupt localStorage entry '{}'", key);
            let _ = storage.remove_item(key);
            None
        }
    }
}

pub fn write_json<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(raw) => {
            let _ = storage.set_item(key, &raw);
        }
        Err(e) => log::error!("Failed to serialize '{}': {}", key, e),
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::settings::PmsSettings;

    #[test]
    fn test_decode_json() {
        let settings: Option<PmsSettings> = decode_json(r#"{"rating_scale_max":7}"#);
        assert_eq!(settings.map(|s| s.rating_scale_max), Some(7));

        let broken: Option<PmsSettings> = decode_json("{not json");
        assert!(broken.is_none());
    }
}
