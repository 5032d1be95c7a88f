//! Service template schema
//!
//! Serde model of the interchange-document subset both pipelines touch: a
//! topology template holding flat maps of node entries and relationship
//! entries, with requirement assignments expressing every cross-reference
//! as a string identifier. Maps are BTreeMaps so serialized documents are
//! deterministic.

use std::collections::BTreeMap;

use archex_core::{ComponentKind, EndpointKind};
use serde::{Deserialize, Serialize};

/// Definitions version emitted into and accepted from every document
pub const TOSCA_DEFINITIONS_VERSION: &str = "tosca_simple_yaml_1_3";

// ===== Node type vocabulary =====

pub const DATA_AGGREGATE_TYPE: &str = "cna.qualityModel.entities.DataAggregate";
pub const BACKING_DATA_TYPE: &str = "cna.qualityModel.entities.BackingData";
pub const INFRASTRUCTURE_TYPE: &str = "cna.qualityModel.entities.Infrastructure";
pub const COMPONENT_TYPE: &str = "cna.qualityModel.entities.Component";
pub const SERVICE_TYPE: &str = "cna.qualityModel.entities.Service";
pub const BACKING_SERVICE_TYPE: &str = "cna.qualityModel.entities.BackingService";
pub const STORAGE_BACKING_SERVICE_TYPE: &str = "cna.qualityModel.entities.StorageBackingService";
pub const ENDPOINT_TYPE: &str = "cna.qualityModel.entities.Endpoint";
pub const EXTERNAL_ENDPOINT_TYPE: &str = "cna.qualityModel.entities.Endpoint.External";
pub const REQUEST_TRACE_TYPE: &str = "cna.qualityModel.entities.RequestTrace";

// ===== Relationship type vocabulary =====

pub const HOSTED_ON_TYPE: &str = "cna.qualityModel.relationships.HostedOn";
pub const CONNECTS_TO_TYPE: &str = "cna.qualityModel.relationships.ConnectsTo.Link";
pub const PROVIDES_ENDPOINT_TYPE: &str = "cna.qualityModel.relationships.Provides.Endpoint";
pub const ATTACHES_TO_DATA_TYPE: &str = "cna.qualityModel.relationships.AttachesTo.Data";

// ===== Capability vocabulary =====

pub const ENDPOINT_CAPABILITY_TYPE: &str = "tosca.capabilities.Endpoint";
pub const EXTERNAL_ENDPOINT_CAPABILITY_TYPE: &str = "tosca.capabilities.Endpoint.Public";

// ===== Requirement names =====

pub const USES_DATA: &str = "uses_data";
pub const USES_BACKING_DATA: &str = "uses_backing_data";
pub const PROVIDES_ENDPOINT: &str = "provides_endpoint";
pub const PROVIDES_EXTERNAL_ENDPOINT: &str = "provides_external_endpoint";
pub const HOST: &str = "host";
pub const ENDPOINT_LINK: &str = "endpoint_link";

// ===== Request trace property names =====

pub const REFERRED_ENDPOINT_PROPERTY: &str = "referred_endpoint";
pub const INVOLVED_LINKS_PROPERTY: &str = "involved_links";
pub const NODES_PROPERTY: &str = "nodes";

/// Property key under which BackingData pairs travel
pub const INCLUDED_DATA_PROPERTY: &str = "includedData";

/// Relationship property key carrying a data usage-relation label
pub const USAGE_RELATION_PROPERTY: &str = "usage_relation";

/// Map a Component kind to its document node type
pub fn component_type_name(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Component => COMPONENT_TYPE,
        ComponentKind::Service => SERVICE_TYPE,
        ComponentKind::BackingService => BACKING_SERVICE_TYPE,
        ComponentKind::StorageBackingService => STORAGE_BACKING_SERVICE_TYPE,
    }
}

/// Map a document node type to a Component kind, if it names one
pub fn component_kind_for(type_name: &str) -> Option<ComponentKind> {
    match type_name {
        COMPONENT_TYPE => Some(ComponentKind::Component),
        SERVICE_TYPE => Some(ComponentKind::Service),
        BACKING_SERVICE_TYPE => Some(ComponentKind::BackingService),
        STORAGE_BACKING_SERVICE_TYPE => Some(ComponentKind::StorageBackingService),
        _ => None,
    }
}

/// Map an Endpoint kind to its document node type
pub fn endpoint_type_name(kind: EndpointKind) -> &'static str {
    match kind {
        EndpointKind::Internal => ENDPOINT_TYPE,
        EndpointKind::External => EXTERNAL_ENDPOINT_TYPE,
    }
}

/// Map a document node type to an Endpoint kind, if it names one
pub fn endpoint_kind_for(type_name: &str) -> Option<EndpointKind> {
    match type_name {
        ENDPOINT_TYPE => Some(EndpointKind::Internal),
        EXTERNAL_ENDPOINT_TYPE => Some(EndpointKind::External),
        _ => None,
    }
}

/// Name of the capability block an endpoint's properties live in
pub fn endpoint_capability_name(kind: EndpointKind) -> &'static str {
    match kind {
        EndpointKind::Internal => "endpoint",
        EndpointKind::External => "external_endpoint",
    }
}

/// Capability type asserted by a provides requirement
pub fn endpoint_capability_type(kind: EndpointKind) -> &'static str {
    match kind {
        EndpointKind::Internal => ENDPOINT_CAPABILITY_TYPE,
        EndpointKind::External => EXTERNAL_ENDPOINT_CAPABILITY_TYPE,
    }
}

/// Top-level service template document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    pub tosca_definitions_version: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology_template: Option<TopologyTemplate>,
}

/// The topology section: every node and relationship entry of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TopologyTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_templates: BTreeMap<String, NodeTemplate>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationship_templates: BTreeMap<String, RelationshipTemplate>,
}

/// One node entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capabilities: BTreeMap<String, Capability>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<RequirementAssignment>,
}

impl NodeTemplate {
    /// Create an empty node entry of the given type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            metadata: BTreeMap::new(),
            properties: BTreeMap::new(),
            capabilities: BTreeMap::new(),
            requirements: Vec::new(),
        }
    }
}

/// A capability block on a node entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Capability {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
}

/// One requirement assignment: requirement name mapped to its target
///
/// Serialized as a single-key map inside the node's requirement list. The
/// wrapper iterates entries so documents that pack several names into one
/// list element still import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementAssignment {
    entries: BTreeMap<String, RequirementTarget>,
}

impl RequirementAssignment {
    /// Create an assignment mapping one requirement name to a target
    pub fn new(name: impl Into<String>, target: RequirementTarget) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(name.into(), target);
        Self { entries }
    }

    /// Iterate (requirement name, target) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequirementTarget)> {
        self.entries.iter().map(|(name, target)| (name.as_str(), target))
    }
}

/// Target of a requirement assignment
///
/// The document allows a bare node identifier (shorthand) or a structured
/// form naming the node plus an optional capability type and relationship
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementTarget {
    /// Shorthand form: just the target node's key
    Node(String),
    /// Structured form
    Extended {
        node: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capability: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        relationship: Option<RelationshipRef>,
    },
}

/// Relationship reference inside a structured requirement target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipRef {
    /// Key of an entry in relationship_templates
    Template(String),
    /// Inline relationship carrying only a type
    Inline {
        #[serde(rename = "type")]
        type_name: String,
    },
}

/// One relationship entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipTemplate {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl RelationshipTemplate {
    /// Create a relationship entry of the given type with no properties
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_target_shorthand_parses_from_string() {
        let yaml = "- uses_data: order\n";
        let requirements: Vec<RequirementAssignment> =
            serde_yaml::from_str(yaml).expect("Should parse");

        let (name, target) = requirements[0].iter().next().expect("Should have an entry");
        assert_eq!(name, "uses_data");
        assert_eq!(target, &RequirementTarget::Node("order".to_string()));
    }

    #[test]
    fn test_requirement_target_extended_parses_from_map() {
        let yaml = r#"
- host:
    node: cluster
    relationship: cluster_hosts_gateway
"#;
        let requirements: Vec<RequirementAssignment> =
            serde_yaml::from_str(yaml).expect("Should parse");

        let (name, target) = requirements[0].iter().next().expect("Should have an entry");
        assert_eq!(name, "host");
        match target {
            RequirementTarget::Extended {
                node,
                capability,
                relationship,
            } => {
                assert_eq!(node, "cluster");
                assert!(capability.is_none());
                assert_eq!(
                    relationship,
                    &Some(RelationshipRef::Template("cluster_hosts_gateway".to_string()))
                );
            }
            RequirementTarget::Node(_) => panic!("Expected the extended form"),
        }
    }

    #[test]
    fn test_inline_relationship_parses_from_type_map() {
        let yaml = r#"
- provides_endpoint:
    capability: tosca.capabilities.Endpoint
    node: http_api
    relationship:
      type: cna.qualityModel.relationships.Provides.Endpoint
"#;
        let requirements: Vec<RequirementAssignment> =
            serde_yaml::from_str(yaml).expect("Should parse");

        let (_, target) = requirements[0].iter().next().expect("Should have an entry");
        match target {
            RequirementTarget::Extended { relationship, .. } => assert_eq!(
                relationship,
                &Some(RelationshipRef::Inline {
                    type_name: PROVIDES_ENDPOINT_TYPE.to_string()
                })
            ),
            RequirementTarget::Node(_) => panic!("Expected the extended form"),
        }
    }

    #[test]
    fn test_empty_sections_are_not_serialized() {
        let template = ServiceTemplate {
            tosca_definitions_version: TOSCA_DEFINITIONS_VERSION.to_string(),
            metadata: BTreeMap::new(),
            description: None,
            topology_template: Some(TopologyTemplate::default()),
        };

        let yaml = serde_yaml::to_string(&template).expect("Should serialize");
        assert!(!yaml.contains("metadata"));
        assert!(!yaml.contains("node_templates"));
        assert!(yaml.contains("tosca_definitions_version: tosca_simple_yaml_1_3"));
    }

    #[test]
    fn test_kind_mappings_invert() {
        use archex_core::ComponentKind;

        for kind in [
            ComponentKind::Component,
            ComponentKind::Service,
            ComponentKind::BackingService,
            ComponentKind::StorageBackingService,
        ] {
            assert_eq!(component_kind_for(component_type_name(kind)), Some(kind));
        }
        assert_eq!(component_kind_for("unrelated.Type"), None);
    }
}
