use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presentation metadata attached to an entity
///
/// A flat key-value map carried opaquely between the editor, the entity
/// graph, and exported documents. Backed by a BTreeMap so serialization
/// order is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    /// Create a new empty Metadata instance
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Set a value by key
    pub fn set(&mut self, key: String, value: serde_json::Value) {
        self.entries.insert(key, value);
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.entries.iter()
    }

    /// Get the number of metadata entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if metadata is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Metadata {
    fn from(entries: BTreeMap<String, serde_json::Value>) -> Self {
        Self { entries }
    }
}

impl From<Metadata> for BTreeMap<String, serde_json::Value> {
    fn from(metadata: Metadata) -> Self {
        metadata.entries
    }
}
