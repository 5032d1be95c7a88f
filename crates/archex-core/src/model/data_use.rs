use serde::{Deserialize, Serialize};

/// A reference from a Component or Infrastructure to a data entity
///
/// Points at a DataAggregate or BackingData by id and carries the
/// free-text usage-relation label describing how the data is used
/// ("uses", "persists", "cached-usage", ...). An empty label means
/// the relation was never annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataUse {
    /// Id of the referenced DataAggregate or BackingData
    pub data_id: String,

    /// Usage-relation label, empty when unannotated
    pub usage_relation: String,
}

impl DataUse {
    /// Create a data reference with a usage-relation label
    pub fn new(data_id: String, usage_relation: String) -> Self {
        Self {
            data_id,
            usage_relation,
        }
    }

    /// Create a data reference with no usage-relation annotation
    pub fn unlabeled(data_id: String) -> Self {
        Self {
            data_id,
            usage_relation: String::new(),
        }
    }
}
