use serde::{Deserialize, Serialize};

use super::metadata::Metadata;
use super::properties::PropertyBag;

/// Whether an endpoint is reachable from inside the system only or also
/// from outside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointKind {
    /// Reachable by other components of the same system
    Internal,
    /// Exposed beyond the system boundary
    External,
}

/// Endpoint - a callable interface owned by exactly one Component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Unique identifier for this Endpoint (UUID v7)
    pub id: String,

    /// Internal or external reachability
    pub kind: EndpointKind,

    /// Human-readable name
    pub name: String,

    /// Presentation metadata
    pub metadata: Metadata,

    /// Free-form properties (protocol, path, port, ...)
    pub properties: PropertyBag,
}

impl Endpoint {
    /// Create a new Endpoint of the given kind
    pub fn new(id: String, kind: EndpointKind, name: String) -> Self {
        Self {
            id,
            kind,
            name,
            metadata: Metadata::new(),
            properties: PropertyBag::new(),
        }
    }

    /// Check whether this endpoint is externally reachable
    pub fn is_external(&self) -> bool {
        self.kind == EndpointKind::External
    }
}
