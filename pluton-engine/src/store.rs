//! Durable (category, key) → value store contract.

use crate::error::StoreResult;
use serde_json::Value;
use std::collections::HashMap;

/// Well-known store categories.
pub mod categories {
    /// Serialized offline player snapshots keyed by player id.
    pub const OFFLINE_PLAYERS: &str = "OfflinePlayers";
    /// Serialized player stats keyed by player id.
    pub const PLAYER_STATS: &str = "PlayerStats";
}

/// Key-value persistence namespaced by category.
///
/// Calls are made from inside hooks on the engine thread, so implementations
/// must answer quickly; a slow backend stalls the engine tick.
pub trait DataStore {
    fn get(&self, category: &str, key: &str) -> StoreResult<Option<Value>>;

    fn set(&mut self, category: &str, key: &str, value: Value) -> StoreResult<()>;

    fn contains(&self, category: &str, key: &str) -> StoreResult<bool> {
        Ok(self.get(category, key)?.is_some())
    }

    /// Removes a value, returning it if it was present.
    fn remove(&mut self, category: &str, key: &str) -> StoreResult<Option<Value>>;
}

/// In-memory [`DataStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: HashMap<String, HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored in a category.
    pub fn len(&self, category: &str) -> usize {
        self.tables.get(category).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(HashMap::is_empty)
    }

    /// Keys of one category, sorted.
    pub fn keys(&self, category: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tables
            .get(category)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}

impl DataStore for MemoryStore {
    fn get(&self, category: &str, key: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .tables
            .get(category)
            .and_then(|table| table.get(key))
            .cloned())
    }

    fn set(&mut self, category: &str, key: &str, value: Value) -> StoreResult<()> {
        self.tables
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn contains(&self, category: &str, key: &str) -> StoreResult<bool> {
        Ok(self
            .tables
            .get(category)
            .is_some_and(|table| table.contains_key(key)))
    }

    fn remove(&mut self, category: &str, key: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .tables
            .get_mut(category)
            .and_then(|table| table.remove(key)))
    }
}
