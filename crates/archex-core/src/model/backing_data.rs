use serde::{Deserialize, Serialize};

use super::metadata::Metadata;

/// One key-value pair of data included in a BackingData entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludedData {
    /// Key under which the data is stored
    pub key: String,

    /// The stored value, carried as an opaque scalar
    pub value: serde_json::Value,
}

/// BackingData - non-business data backing components and infrastructure
///
/// Configuration values, credentials, certificates and similar data that
/// Components and Infrastructure entities consume. Carries an ordered
/// list of included key-value pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackingData {
    /// Unique identifier for this BackingData (UUID v7)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Presentation metadata
    pub metadata: Metadata,

    /// Included key-value data, in insertion order
    pub included_data: Vec<IncludedData>,
}

impl BackingData {
    /// Create a new BackingData with the given id and name
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            metadata: Metadata::new(),
            included_data: Vec::new(),
        }
    }

    /// Append an included key-value pair
    pub fn add_included_data(&mut self, key: String, value: serde_json::Value) {
        self.included_data.push(IncludedData { key, value });
    }
}
