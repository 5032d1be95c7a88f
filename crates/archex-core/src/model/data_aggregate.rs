use serde::{Deserialize, Serialize};

use super::metadata::Metadata;

/// DataAggregate - a logical unit of business data
///
/// Describes data a Component works with (an "order", a "customer
/// profile"). Referenced by Components through data uses; never owns
/// other entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAggregate {
    /// Unique identifier for this DataAggregate (UUID v7)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Presentation metadata
    pub metadata: Metadata,
}

impl DataAggregate {
    /// Create a new DataAggregate with the given id and name
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            metadata: Metadata::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_data_aggregate() {
        let aggregate = DataAggregate::new("data-1".to_string(), "Order".to_string());

        assert_eq!(aggregate.id, "data-1");
        assert_eq!(aggregate.name, "Order");
        assert!(aggregate.metadata.is_empty());
    }
}
