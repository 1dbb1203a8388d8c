// Key-value port for search history and last-search replay
// Callers never see the backing medium

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Minimal string store with get/set/clear
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn clear(&self, key: &str);

    /// Read-modify-write of one key. `apply` sees the current value and
    /// returns the replacement, or `None` to leave the entry as it is.
    ///
    /// The default is get-then-set and can lose concurrent writes;
    /// stores that can lock a key should override it.
    fn update(&self, key: &str, apply: &mut dyn FnMut(Option<&str>) -> Option<String>) {
        let current = self.get(key);
        if let Some(next) = apply(current.as_deref()) {
            self.set(key, next);
        }
    }
}

/// Process-local store; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn clear(&self, key: &str) {
        self.entries.remove(key);
    }

    // Holds the shard lock for the whole update
    fn update(&self, key: &str, apply: &mut dyn FnMut(Option<&str>) -> Option<String>) {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let next = apply(Some(entry.get().as_str()));
                if let Some(next) = next {
                    entry.insert(next);
                }
            }
            Entry::Vacant(entry) => {
                if let Some(next) = apply(None) {
                    entry.insert(next);
                }
            }
        }
    }
}
