use serde::{Deserialize, Serialize};

use super::properties::PropertyBag;

/// DeploymentMapping - records that an entity runs on an Infrastructure
///
/// The deployed side is either a Component or another Infrastructure, by
/// id; the converter decides which by looking both collections up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentMapping {
    /// Unique identifier for this DeploymentMapping (UUID v7)
    pub id: String,

    /// Id of the deployed Component or Infrastructure
    pub deployed_id: String,

    /// Id of the underlying Infrastructure
    pub infrastructure_id: String,

    /// Free-form properties of the hosting relation
    pub properties: PropertyBag,
}

impl DeploymentMapping {
    /// Create a new DeploymentMapping between a deployed entity and its host
    pub fn new(id: String, deployed_id: String, infrastructure_id: String) -> Self {
        Self {
            id,
            deployed_id,
            infrastructure_id,
            properties: PropertyBag::new(),
        }
    }
}
