use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property bag attached to an entity
///
/// Holds the free-form properties an entity carries into and out of
/// exported documents. Values are opaque JSON scalars/structures; the
/// converter copies them verbatim and only when the bag is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: BTreeMap<String, serde_json::Value>,
}

impl PropertyBag {
    /// Create a new empty property bag
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Get a property value by key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Set a property value by key
    pub fn set(&mut self, key: String, value: serde_json::Value) {
        self.entries.insert(key, value);
    }

    /// Remove a property value by key
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.entries.remove(key)
    }

    /// Iterate over all properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.entries.iter()
    }

    /// Get the number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for PropertyBag {
    fn from(entries: BTreeMap<String, serde_json::Value>) -> Self {
        Self { entries }
    }
}

impl From<PropertyBag> for BTreeMap<String, serde_json::Value> {
    fn from(bag: PropertyBag) -> Self {
        bag.entries
    }
}
