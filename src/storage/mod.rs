use serde::{Deserialize, Serialize};
#[cfg(test)]
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

pub(crate) const KEY_PREFIX: &str = "linkwarp_";

pub(crate) const DASHBOARD_ORDER_KEY: &str = "linkwarp_dashboard_page_order";
pub(crate) const DASHBOARD_THEME_KEY: &str = "linkwarp_dashboard_theme_mode";
pub(crate) const DASHBOARD_COLOR_KEY: &str = "linkwarp_dashboard_custom_primary_color";
pub(crate) const TOUR_TAKEN_KEY: &str = "linkwarp_tour_taken";

const SENTINEL_KEYS: [&str; 4] = [
    DASHBOARD_ORDER_KEY,
    DASHBOARD_THEME_KEY,
    DASHBOARD_COLOR_KEY,
    TOUR_TAKEN_KEY,
];

#[derive(Debug, thiserror::Error)]
pub(crate) enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,

    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },

    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },

    #[error("failed to remove `{key}`: {message}")]
    Remove { key: String, message: String },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub(crate) type StorageResult<T> = Result<T, StorageError>;

/// Flat string key-value namespace the whole app persists into.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
    fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>>;
}

pub(crate) fn page_key(hash: &str) -> String {
    format!("{KEY_PREFIX}{hash}")
}

/// Page hash for a storage key, or `None` for foreign and sentinel keys.
pub(crate) fn hash_from_key(key: &str) -> Option<&str> {
    if SENTINEL_KEYS.contains(&key) {
        return None;
    }
    key.strip_prefix(KEY_PREFIX).filter(|h| !h.is_empty())
}

/// Missing keys and unparsable values both come back as `None`; the latter
/// is logged.
pub(crate) fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("{e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring malformed JSON under `{key}`: {e}");
            None
        }
    }
}

pub(crate) fn save_json<S, T>(store: &S, key: &str, value: &T) -> StorageResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// `window.localStorage`, resolved on every call.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

impl BrowserStore {
    fn storage(&self) -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

fn js_message(v: wasm_bindgen::JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                message: js_message(e),
            })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: js_message(e),
            })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Remove {
                key: key.to_string(),
                message: js_message(e),
            })
    }

    fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let storage = self.storage()?;
        let len = storage.length().map_err(|e| StorageError::Read {
            key: "<length>".to_string(),
            message: js_message(e),
        })?;

        let mut keys = Vec::new();
        for i in 0..len {
            if let Ok(Some(k)) = storage.key(i) {
                if k.starts_with(prefix) {
                    keys.push(k);
                }
            }
        }
        Ok(keys)
    }
}

/// In-memory store. Clones share the same map.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    read_only: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes fail, like a browser over quota.
    pub fn read_only(self) -> Self {
        Self {
            items: self.items,
            read_only: true,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn raw_set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.read_only {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        if self.read_only {
            return Err(StorageError::Remove {
                key: key.to_string(),
                message: "storage is read-only".to_string(),
            });
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .items
            .borrow()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

pub(crate) fn load_flag(store: &impl KeyValueStore, key: &str) -> bool {
    store
        .get(key)
        .ok()
        .flatten()
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false)
}

pub(crate) fn save_flag(store: &impl KeyValueStore, key: &str, value: bool) {
    if let Err(e) = store.set(key, if value { "true" } else { "false" }) {
        log::warn!("{e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_roundtrips_through_hash_from_key() {
        let key = page_key("abc123");
        assert_eq!(key, "linkwarp_abc123");
        assert_eq!(hash_from_key(&key), Some("abc123"));
    }

    #[test]
    fn test_hash_from_key_rejects_sentinels_and_foreign_keys() {
        assert_eq!(hash_from_key(DASHBOARD_ORDER_KEY), None);
        assert_eq!(hash_from_key(DASHBOARD_THEME_KEY), None);
        assert_eq!(hash_from_key(DASHBOARD_COLOR_KEY), None);
        assert_eq!(hash_from_key(TOUR_TAKEN_KEY), None);
        assert_eq!(hash_from_key("other_app_key"), None);
        assert_eq!(hash_from_key("linkwarp_"), None);
    }

    #[test]
    fn test_memory_store_lists_by_prefix() {
        let store = MemoryStore::new();
        store.set("linkwarp_a", "1").expect("set");
        store.set("linkwarp_b", "2").expect("set");
        store.set("elsewhere", "3").expect("set");

        let keys = store.list_keys(KEY_PREFIX).expect("list");
        assert_eq!(keys, vec!["linkwarp_a".to_string(), "linkwarp_b".to_string()]);

        store.remove("linkwarp_a").expect("remove");
        assert!(!store.contains("linkwarp_a"));
    }

    #[test]
    fn test_load_json_treats_malformed_values_as_absent() {
        let store = MemoryStore::new();
        store.raw_set("linkwarp_bad", "{not json");
        assert!(load_json::<_, Vec<String>>(&store, "linkwarp_bad").is_none());
        assert!(load_json::<_, Vec<String>>(&store, "linkwarp_missing").is_none());
    }

    #[test]
    fn test_read_only_store_reports_write_errors() {
        let store = MemoryStore::new().read_only();
        let err = save_json(&store, "linkwarp_x", &vec!["a"]).expect_err("write must fail");
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[test]
    fn test_flags() {
        let store = MemoryStore::new();
        assert!(!load_flag(&store, TOUR_TAKEN_KEY));
        save_flag(&store, TOUR_TAKEN_KEY, true);
        assert!(load_flag(&store, TOUR_TAKEN_KEY));
    }
}
