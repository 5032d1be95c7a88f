use serde::{Deserialize, Serialize};

use super::properties::PropertyBag;

/// Link - a connection from a source Component to a target Endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique identifier for this Link (UUID v7)
    pub id: String,

    /// Id of the calling Component
    pub source_id: String,

    /// Id of the called Endpoint
    pub target_endpoint_id: String,

    /// Free-form properties of the connection
    pub properties: PropertyBag,
}

impl Link {
    /// Create a new Link from a Component to an Endpoint
    pub fn new(id: String, source_id: String, target_endpoint_id: String) -> Self {
        Self {
            id,
            source_id,
            target_endpoint_id,
            properties: PropertyBag::new(),
        }
    }
}
