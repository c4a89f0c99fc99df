//! The primary's authoritative key→value map (component D, §3).
//!
//! SET/redistribution write through here; GET falls back here when no
//! replica has the value. Seeded at startup per §9's startup contract.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Seed entries visible to every fresh primary process (§9).
const SEED: [(&str, &str); 3] = [("hello", "world"), ("code", "it559"), ("dis", "sys")];

pub struct Catalog {
    store: RwLock<HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        let store = SEED
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.store.write().insert(key.into(), value.into());
    }

    /// Removes `key`, returning whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.store.write().remove(key).is_some()
    }

    /// Snapshot of every key currently held.
    pub fn keys(&self) -> Vec<String> {
        self.store.read().keys().cloned().collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
