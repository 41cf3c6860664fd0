//! Keyed value store with hard-miss lookup.

use crate::error::PipelineError;
use std::collections::BTreeMap;

/// Maps a string key to exactly one current value.
///
/// Lookups fail loudly: callers must not treat absence as a default.
#[derive(Debug, Clone, Default)]
pub struct KeyedStore<V> {
    map: BTreeMap<String, V>,
}

impl<V> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Current value under `key`, or `KeyNotFound`.
    pub fn get(&self, key: &str) -> Result<&V, PipelineError> {
        self.map
            .get(key)
            .ok_or_else(|| PipelineError::KeyNotFound(key.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut V, PipelineError> {
        self.map
            .get_mut(key)
            .ok_or_else(|| PipelineError::KeyNotFound(key.to_string()))
    }

    /// Insert or overwrite. No merge semantics at this level; stages that
    /// merge do so before storing.
    pub fn insert(&mut self, key: String, value: V) {
        self.map.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.map.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
