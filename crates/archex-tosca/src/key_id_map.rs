//! Bidirectional key/id registry
//!
//! One conversion run associates every document key with exactly one
//! internal entity id. Lookups must work in both directions: export
//! resolves ids to keys, import resolves keys to ids, and both treat an
//! unregistered argument as a hard error.

use std::collections::HashMap;

use crate::errors::{Result, ToscaError};

/// 1:1 association between document keys and entity ids for one run
#[derive(Debug, Default)]
pub struct KeyIdMap {
    key_to_id: HashMap<String, String>,
    id_to_key: HashMap<String, String>,
}

impl KeyIdMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            key_to_id: HashMap::new(),
            id_to_key: HashMap::new(),
        }
    }

    /// Register a fresh key/id pair
    ///
    /// # Errors
    /// Returns `DuplicateKey`/`DuplicateId` if either side is already
    /// registered; callers register each entity at most once.
    pub fn add(&mut self, key: String, id: String) -> Result<()> {
        if self.key_to_id.contains_key(&key) {
            return Err(ToscaError::DuplicateKey { key });
        }
        if self.id_to_key.contains_key(&id) {
            return Err(ToscaError::DuplicateId { key, id });
        }
        self.key_to_id.insert(key.clone(), id.clone());
        self.id_to_key.insert(id, key);
        Ok(())
    }

    /// Resolve the entity id registered for a document key
    ///
    /// # Errors
    /// Returns `UnknownKey` if the key was never registered.
    pub fn id_of(&self, key: &str) -> Result<&str> {
        self.key_to_id
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ToscaError::UnknownKey {
                key: key.to_string(),
            })
    }

    /// Resolve the document key registered for an entity id
    ///
    /// # Errors
    /// Returns `UnknownId` if the id was never registered.
    pub fn key_of(&self, id: &str) -> Result<&str> {
        self.id_to_key
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| ToscaError::UnknownId { id: id.to_string() })
    }

    /// Check whether a key is registered
    pub fn contains_key(&self, key: &str) -> bool {
        self.key_to_id.contains_key(key)
    }
}
