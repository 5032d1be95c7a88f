use serde::{Deserialize, Serialize};

use super::data_use::DataUse;
use super::metadata::Metadata;
use super::properties::PropertyBag;

/// Infrastructure - an entity that components and other infrastructure run on
///
/// A cluster, a VM, a serverless platform. May consume BackingData and may
/// itself be hosted on another Infrastructure, either through the optional
/// `hosted_by` reference or through an explicit DeploymentMapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    /// Unique identifier for this Infrastructure (UUID v7)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Presentation metadata
    pub metadata: Metadata,

    /// Free-form properties
    pub properties: PropertyBag,

    /// Referenced BackingData entities, each with a usage-relation label
    pub backing_data_uses: Vec<DataUse>,

    /// Optional id of the Infrastructure this one runs on
    pub hosted_by: Option<String>,
}

impl Infrastructure {
    /// Create a new Infrastructure with the given id and name
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            metadata: Metadata::new(),
            properties: PropertyBag::new(),
            backing_data_uses: Vec::new(),
            hosted_by: None,
        }
    }

    /// Attach a BackingData reference
    pub fn add_backing_data_use(&mut self, data_use: DataUse) {
        self.backing_data_uses.push(data_use);
    }
}
