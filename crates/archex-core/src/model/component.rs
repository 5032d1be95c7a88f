use serde::{Deserialize, Serialize};

use super::data_use::DataUse;
use super::metadata::Metadata;
use super::properties::PropertyBag;

/// The concrete kind of a Component
///
/// Carried as an explicit tag on the entity; the converter switches on it
/// to pick the document type identifier for the node entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Generic component with no further qualification
    Component,
    /// A service exposing business functionality
    Service,
    /// A supporting service (messaging, configuration, logging)
    BackingService,
    /// A service whose purpose is persisting data
    StorageBackingService,
}

/// Component - a deployable unit of the modeled architecture
///
/// Owns its Endpoints (ownership, not a back-reference: endpoints live in
/// the System's endpoint collection but belong to exactly one Component)
/// and references the data it works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique identifier for this Component (UUID v7)
    pub id: String,

    /// Concrete kind, determines the exported node type
    pub kind: ComponentKind,

    /// Human-readable name
    pub name: String,

    /// Presentation metadata
    pub metadata: Metadata,

    /// Free-form properties
    pub properties: PropertyBag,

    /// Ids of owned Endpoints, in creation order
    pub endpoint_ids: Vec<String>,

    /// Referenced DataAggregate entities, each with a usage-relation label
    pub data_aggregate_uses: Vec<DataUse>,

    /// Referenced BackingData entities, each with a usage-relation label
    pub backing_data_uses: Vec<DataUse>,
}

impl Component {
    /// Create a new Component of the given kind
    pub fn new(id: String, kind: ComponentKind, name: String) -> Self {
        Self {
            id,
            kind,
            name,
            metadata: Metadata::new(),
            properties: PropertyBag::new(),
            endpoint_ids: Vec::new(),
            data_aggregate_uses: Vec::new(),
            backing_data_uses: Vec::new(),
        }
    }

    /// Add an Endpoint id to this Component's owned list
    pub fn add_endpoint_id(&mut self, endpoint_id: String) {
        if !self.endpoint_ids.contains(&endpoint_id) {
            self.endpoint_ids.push(endpoint_id);
        }
    }

    /// Attach a DataAggregate reference
    pub fn add_data_aggregate_use(&mut self, data_use: DataUse) {
        self.data_aggregate_uses.push(data_use);
    }

    /// Attach a BackingData reference
    pub fn add_backing_data_use(&mut self, data_use: DataUse) {
        self.backing_data_uses.push(data_use);
    }
}
