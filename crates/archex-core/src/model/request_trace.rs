use serde::{Deserialize, Serialize};

use super::metadata::Metadata;
use super::properties::PropertyBag;

/// RequestTrace - an ordered call path through the system
///
/// Describes how a request entering through an ExternalEndpoint travels
/// across Links. The endpoint reference is optional so traces whose entry
/// point was never recorded stay representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTrace {
    /// Unique identifier for this RequestTrace (UUID v7)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Presentation metadata
    pub metadata: Metadata,

    /// Free-form properties (latency annotations and similar)
    pub properties: PropertyBag,

    /// Id of the ExternalEndpoint the trace enters through, if recorded
    pub external_endpoint_id: Option<String>,

    /// Ids of the involved Links, in call order
    pub link_ids: Vec<String>,
}

impl RequestTrace {
    /// Create a new RequestTrace with no endpoint and no links
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            metadata: Metadata::new(),
            properties: PropertyBag::new(),
            external_endpoint_id: None,
            link_ids: Vec::new(),
        }
    }

    /// Append a Link id to the call path
    pub fn add_link_id(&mut self, link_id: String) {
        self.link_ids.push(link_id);
    }
}
