//! Graph to document conversion
//!
//! One deterministic walk over a System snapshot, entity kinds visited in
//! dependency order so every requirement references a key registered by an
//! earlier pass: data, infrastructure, components (with their endpoints),
//! deployment mappings, links, request traces. The input graph is never
//! mutated; all run state lives in the Exporter and is discarded with it.

use std::collections::BTreeMap;

use archex_core::{BackingData, Component, DataUse, EndpointKind, System};
use tracing::debug;

use crate::errors::{Result, ToscaError};
use crate::key_id_map::KeyIdMap;
use crate::sanitize::to_identifier;
use crate::template::{
    component_type_name, endpoint_capability_name, endpoint_capability_type, endpoint_type_name,
    Capability, NodeTemplate, RelationshipRef, RelationshipTemplate, RequirementAssignment,
    RequirementTarget, ServiceTemplate, TopologyTemplate, ATTACHES_TO_DATA_TYPE, BACKING_DATA_TYPE,
    CONNECTS_TO_TYPE, DATA_AGGREGATE_TYPE, ENDPOINT_LINK, HOST, HOSTED_ON_TYPE,
    INCLUDED_DATA_PROPERTY, INFRASTRUCTURE_TYPE, INVOLVED_LINKS_PROPERTY, NODES_PROPERTY,
    PROVIDES_ENDPOINT, PROVIDES_ENDPOINT_TYPE, PROVIDES_EXTERNAL_ENDPOINT,
    REFERRED_ENDPOINT_PROPERTY, REQUEST_TRACE_TYPE, TOSCA_DEFINITIONS_VERSION, USAGE_RELATION_PROPERTY,
    USES_BACKING_DATA, USES_DATA,
};
use crate::unique_keys::UniqueKeyRegistry;

/// Convert a System snapshot into a service template document
///
/// Total for a well-formed graph; a failure means the graph itself broke a
/// reference invariant and should be treated as a programming error.
///
/// # Errors
/// Returns `UnknownId` when an entity references an id no export pass
/// registered, `Internal` when a requirement has no node entry to land on.
pub fn export_system(system: &System) -> Result<ServiceTemplate> {
    debug!(system = %system.name, "Exporting system to service template");
    let exporter = Exporter::new(system);
    let template = exporter.run()?;
    debug!(system = %system.name, "Export finished");
    Ok(template)
}

/// State of one export run
struct Exporter<'a> {
    system: &'a System,
    unique_keys: UniqueKeyRegistry,
    key_id_map: KeyIdMap,
    nodes: BTreeMap<String, NodeTemplate>,
    relationships: BTreeMap<String, RelationshipTemplate>,
}

impl<'a> Exporter<'a> {
    fn new(system: &'a System) -> Self {
        Self {
            system,
            unique_keys: UniqueKeyRegistry::new(),
            key_id_map: KeyIdMap::new(),
            nodes: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    fn run(mut self) -> Result<ServiceTemplate> {
        self.export_data_aggregates()?;
        self.export_backing_data()?;
        self.export_infrastructures()?;
        self.export_components()?;
        self.export_deployment_mappings()?;
        self.export_links()?;
        self.export_request_traces()?;
        Ok(self.assemble())
    }

    /// Pass 1a: DataAggregate node entries, no outgoing references
    fn export_data_aggregates(&mut self) -> Result<()> {
        for aggregate in self.system.data_aggregates() {
            let key = self.register(&aggregate.name, &aggregate.id)?;
            let mut node = NodeTemplate::new(DATA_AGGREGATE_TYPE);
            node.metadata = aggregate.metadata.clone().into();
            self.nodes.insert(key, node);
        }
        Ok(())
    }

    /// Pass 1b: BackingData node entries with their included data
    fn export_backing_data(&mut self) -> Result<()> {
        for backing in self.system.backing_data() {
            let key = self.register(&backing.name, &backing.id)?;
            let mut node = NodeTemplate::new(BACKING_DATA_TYPE);
            node.metadata = backing.metadata.clone().into();
            if !backing.included_data.is_empty() {
                node.properties.insert(
                    INCLUDED_DATA_PROPERTY.to_string(),
                    included_data_value(backing),
                );
            }
            self.nodes.insert(key, node);
        }
        Ok(())
    }

    /// Pass 2: Infrastructure node entries with backing-data requirements
    fn export_infrastructures(&mut self) -> Result<()> {
        for infrastructure in self.system.infrastructures() {
            let key = self.register(&infrastructure.name, &infrastructure.id)?;
            let mut node = NodeTemplate::new(INFRASTRUCTURE_TYPE);
            node.metadata = infrastructure.metadata.clone().into();
            if !infrastructure.properties.is_empty() {
                node.properties = infrastructure.properties.clone().into();
            }
            for data_use in &infrastructure.backing_data_uses {
                let requirement =
                    self.data_use_requirement(&key, USES_BACKING_DATA, data_use)?;
                node.requirements.push(requirement);
            }
            self.nodes.insert(key, node);
        }
        Ok(())
    }

    /// Pass 3: Component node entries, their endpoints as separate nodes
    fn export_components(&mut self) -> Result<()> {
        for component in self.system.components() {
            let key = self.register(&component.name, &component.id)?;
            let mut node = NodeTemplate::new(component_type_name(component.kind));
            node.metadata = component.metadata.clone().into();
            if !component.properties.is_empty() {
                node.properties = component.properties.clone().into();
            }
            // Internal endpoints first, then external, matching the
            // requirement names
            for kind in [EndpointKind::Internal, EndpointKind::External] {
                for requirement in self.export_endpoints_of(component, kind)? {
                    node.requirements.push(requirement);
                }
            }
            for data_use in &component.data_aggregate_uses {
                let requirement = self.data_use_requirement(&key, USES_DATA, data_use)?;
                node.requirements.push(requirement);
            }
            for data_use in &component.backing_data_uses {
                let requirement =
                    self.data_use_requirement(&key, USES_BACKING_DATA, data_use)?;
                node.requirements.push(requirement);
            }
            self.nodes.insert(key, node);
        }
        Ok(())
    }

    /// Emit node entries for a component's endpoints of one kind and
    /// return the provides requirements to attach to the component
    fn export_endpoints_of(
        &mut self,
        component: &Component,
        kind: EndpointKind,
    ) -> Result<Vec<RequirementAssignment>> {
        let requirement_name = match kind {
            EndpointKind::Internal => PROVIDES_ENDPOINT,
            EndpointKind::External => PROVIDES_EXTERNAL_ENDPOINT,
        };
        let mut requirements = Vec::new();
        for endpoint_id in &component.endpoint_ids {
            let endpoint = self.system.get_endpoint(endpoint_id)?;
            if endpoint.kind != kind {
                continue;
            }
            let key = self.register(&endpoint.name, &endpoint.id)?;
            let mut node = NodeTemplate::new(endpoint_type_name(kind));
            node.metadata = endpoint.metadata.clone().into();
            let mut capability = Capability::default();
            if !endpoint.properties.is_empty() {
                capability.properties = endpoint.properties.clone().into();
            }
            node.capabilities
                .insert(endpoint_capability_name(kind).to_string(), capability);
            requirements.push(RequirementAssignment::new(
                requirement_name,
                RequirementTarget::Extended {
                    node: key.clone(),
                    capability: Some(endpoint_capability_type(kind).to_string()),
                    relationship: Some(RelationshipRef::Inline {
                        type_name: PROVIDES_ENDPOINT_TYPE.to_string(),
                    }),
                },
            ));
            self.nodes.insert(key, node);
        }
        Ok(requirements)
    }

    /// Pass 4: relationship entry plus host requirement per DeploymentMapping
    fn export_deployment_mappings(&mut self) -> Result<()> {
        for mapping in self.system.deployment_mappings() {
            let host_key = self.key_id_map.key_of(&mapping.infrastructure_id)?.to_string();
            let deployed_key = self.key_id_map.key_of(&mapping.deployed_id)?.to_string();
            let relationship_key = self
                .unique_keys
                .ensure_unique(format!("{host_key}_hosts_{deployed_key}"));
            let mut relationship = RelationshipTemplate::new(HOSTED_ON_TYPE);
            if !mapping.properties.is_empty() {
                relationship.properties = mapping.properties.clone().into();
            }
            self.relationships
                .insert(relationship_key.clone(), relationship);
            self.key_id_map
                .add(relationship_key.clone(), mapping.id.clone())?;
            self.append_requirement(
                &deployed_key,
                RequirementAssignment::new(
                    HOST,
                    RequirementTarget::Extended {
                        node: host_key,
                        capability: None,
                        relationship: Some(RelationshipRef::Template(relationship_key)),
                    },
                ),
            )?;
        }
        Ok(())
    }

    /// Pass 5: relationship entry plus endpoint_link requirement per Link
    fn export_links(&mut self) -> Result<()> {
        for link in self.system.links() {
            let source_key = self.key_id_map.key_of(&link.source_id)?.to_string();
            let target_key = self
                .key_id_map
                .key_of(&link.target_endpoint_id)?
                .to_string();
            let relationship_key = self
                .unique_keys
                .ensure_unique(format!("{source_key}_linksTo_{target_key}"));
            let mut relationship = RelationshipTemplate::new(CONNECTS_TO_TYPE);
            if !link.properties.is_empty() {
                relationship.properties = link.properties.clone().into();
            }
            self.relationships
                .insert(relationship_key.clone(), relationship);
            self.key_id_map.add(relationship_key.clone(), link.id.clone())?;
            self.append_requirement(
                &source_key,
                RequirementAssignment::new(
                    ENDPOINT_LINK,
                    RequirementTarget::Extended {
                        node: target_key,
                        capability: None,
                        relationship: Some(RelationshipRef::Template(relationship_key)),
                    },
                ),
            )?;
        }
        Ok(())
    }

    /// Pass 6: RequestTrace node entries referencing links by relationship key
    fn export_request_traces(&mut self) -> Result<()> {
        for trace in self.system.request_traces() {
            let key = self
                .unique_keys
                .ensure_unique(to_identifier(&trace.name));
            let mut node = NodeTemplate::new(REQUEST_TRACE_TYPE);
            node.metadata = trace.metadata.clone().into();
            node.properties = trace.properties.clone().into();

            let mut link_keys = Vec::new();
            let mut node_keys: Vec<String> = Vec::new();
            for link_id in &trace.link_ids {
                let link = self.system.get_link(link_id)?;
                link_keys.push(self.key_id_map.key_of(link_id)?.to_string());
                let source_key = self.key_id_map.key_of(&link.source_id)?.to_string();
                if !node_keys.contains(&source_key) {
                    node_keys.push(source_key);
                }
                if let Some(owner) = self.system.search_owner_of_endpoint(&link.target_endpoint_id)
                {
                    let owner_key = self.key_id_map.key_of(&owner.id)?.to_string();
                    if !node_keys.contains(&owner_key) {
                        node_keys.push(owner_key);
                    }
                }
            }
            node.properties.insert(
                NODES_PROPERTY.to_string(),
                serde_json::Value::from(node_keys),
            );
            node.properties.insert(
                INVOLVED_LINKS_PROPERTY.to_string(),
                serde_json::Value::from(link_keys),
            );
            if let Some(endpoint_id) = &trace.external_endpoint_id {
                let endpoint_key = self.key_id_map.key_of(endpoint_id)?.to_string();
                node.properties.insert(
                    REFERRED_ENDPOINT_PROPERTY.to_string(),
                    serde_json::Value::String(endpoint_key),
                );
            }
            self.nodes.insert(key, node);
        }
        Ok(())
    }

    fn assemble(self) -> ServiceTemplate {
        let mut metadata = BTreeMap::new();
        metadata.insert("template_author".to_string(), "archex".to_string());
        metadata.insert("template_name".to_string(), self.system.name.clone());
        metadata.insert("template_version".to_string(), "0.1.0".to_string());
        ServiceTemplate {
            tosca_definitions_version: TOSCA_DEFINITIONS_VERSION.to_string(),
            metadata,
            description: Some("Service template generated by archex".to_string()),
            topology_template: Some(TopologyTemplate {
                description: Some("Topology template generated by archex".to_string()),
                node_templates: self.nodes,
                relationship_templates: self.relationships,
            }),
        }
    }

    /// Derive a unique key for an entity and register it against its id
    fn register(&mut self, name: &str, id: &str) -> Result<String> {
        let key = self.unique_keys.ensure_unique(to_identifier(name));
        self.key_id_map.add(key.clone(), id.to_string())?;
        Ok(key)
    }

    /// Build a uses_data/uses_backing_data requirement; a labeled use also
    /// emits the relationship entry carrying the label
    fn data_use_requirement(
        &mut self,
        node_key: &str,
        requirement_name: &'static str,
        data_use: &DataUse,
    ) -> Result<RequirementAssignment> {
        let data_key = self.key_id_map.key_of(&data_use.data_id)?.to_string();
        if data_use.usage_relation.is_empty() {
            return Ok(RequirementAssignment::new(
                requirement_name,
                RequirementTarget::Node(data_key),
            ));
        }
        let relationship_key = self
            .unique_keys
            .ensure_unique(format!("{node_key}_uses_{data_key}"));
        let mut relationship = RelationshipTemplate::new(ATTACHES_TO_DATA_TYPE);
        relationship.properties.insert(
            USAGE_RELATION_PROPERTY.to_string(),
            serde_json::Value::String(data_use.usage_relation.clone()),
        );
        self.relationships
            .insert(relationship_key.clone(), relationship);
        Ok(RequirementAssignment::new(
            requirement_name,
            RequirementTarget::Extended {
                node: data_key,
                capability: None,
                relationship: Some(RelationshipRef::Template(relationship_key)),
            },
        ))
    }

    /// Append a requirement onto an already-emitted node entry
    fn append_requirement(
        &mut self,
        node_key: &str,
        requirement: RequirementAssignment,
    ) -> Result<()> {
        let node = self
            .nodes
            .get_mut(node_key)
            .ok_or_else(|| ToscaError::Internal {
                message: format!("no node entry '{node_key}' to receive a requirement"),
            })?;
        node.requirements.push(requirement);
        Ok(())
    }
}

/// Serialize included data pairs as the includedData property map
fn included_data_value(backing: &BackingData) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for pair in &backing.included_data {
        map.insert(pair.key.clone(), pair.value.clone());
    }
    serde_json::Value::Object(map)
}
