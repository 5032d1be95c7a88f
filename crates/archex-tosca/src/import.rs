//! Document to graph conversion
//!
//! Mirrors the export walk: entity kinds are imported in dependency order
//! so every key a requirement references was registered by an earlier
//! pass. Endpoint nodes are parsed into a staging table and only enter
//! the graph once a component claims them; host requirements on
//! infrastructure nodes wait until every infrastructure is registered;
//! relationship entry properties are copied onto their entities after all
//! requirements are resolved. Any failure aborts the run with an error
//! naming the offending identifier.

use std::collections::HashMap;

use archex_core::{
    ids, BackingData, Component, DataAggregate, DataUse, DeploymentMapping, Endpoint,
    EndpointKind, Infrastructure, Link, RequestTrace, System,
};
use tracing::debug;

use crate::errors::{Result, ToscaError};
use crate::key_id_map::KeyIdMap;
use crate::sanitize::to_label;
use crate::template::{
    component_kind_for, endpoint_capability_name, endpoint_kind_for, RelationshipRef,
    RequirementTarget, ServiceTemplate, TopologyTemplate, BACKING_DATA_TYPE, CONNECTS_TO_TYPE,
    DATA_AGGREGATE_TYPE, ENDPOINT_LINK, HOST, HOSTED_ON_TYPE, INCLUDED_DATA_PROPERTY,
    INFRASTRUCTURE_TYPE, INVOLVED_LINKS_PROPERTY, NODES_PROPERTY, PROVIDES_ENDPOINT,
    PROVIDES_EXTERNAL_ENDPOINT, REFERRED_ENDPOINT_PROPERTY, REQUEST_TRACE_TYPE,
    USAGE_RELATION_PROPERTY, USES_BACKING_DATA, USES_DATA,
};

/// Build a System from service template document text
///
/// The system takes its name from `source_name` up to the first dot, so a
/// file name like `shop.yaml` yields the system name `shop`.
///
/// # Errors
/// Returns `Yaml` when the text is not a parseable service template, and
/// any error of [`import_template`] once parsing succeeded.
pub fn import_document(source_name: &str, document: &str) -> Result<System> {
    let template: ServiceTemplate = serde_yaml::from_str(document)?;
    import_template(source_name, &template)
}

/// Build a System from an already-parsed service template
///
/// # Errors
/// Returns `MissingTopology` when the document has no topology section,
/// `UnresolvedRequirement`, `UnsupportedShortForm`,
/// `MissingRequirementField`, `WrongTargetKind` or `EndpointClaimedTwice`
/// for malformed requirements, `OrphanRelationship` for unreferenced
/// relationship entries with properties, and the trace errors for broken
/// RequestTrace references.
pub fn import_template(source_name: &str, template: &ServiceTemplate) -> Result<System> {
    let topology = match &template.topology_template {
        Some(topology) => topology,
        None => return Err(ToscaError::MissingTopology),
    };
    let name = system_name_from(source_name);
    debug!(system = %name, "Importing service template");
    let importer = Importer::new(name, topology);
    let system = importer.run()?;
    debug!(system = %system.name, "Import finished");
    Ok(system)
}

/// Derive the system name from a document source name
fn system_name_from(source_name: &str) -> String {
    match source_name.find('.') {
        Some(position) => source_name[..position].to_string(),
        None => source_name.to_string(),
    }
}

/// State of one import run
struct Importer<'a> {
    topology: &'a TopologyTemplate,
    system: System,
    key_id_map: KeyIdMap,
    /// Endpoints parsed in pass 3, keyed by id, waiting for the provides
    /// requirement that claims them
    staged_endpoints: HashMap<String, Endpoint>,
}

impl<'a> Importer<'a> {
    fn new(system_name: String, topology: &'a TopologyTemplate) -> Self {
        Self {
            topology,
            system: System::new(system_name),
            key_id_map: KeyIdMap::new(),
            staged_endpoints: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<System> {
        self.import_data_entities()?;
        self.import_infrastructures()?;
        self.stage_endpoints()?;
        self.import_components()?;
        self.import_infrastructure_hosts()?;
        self.adopt_unclaimed_endpoints();
        self.backfill_relationship_properties()?;
        self.import_request_traces()?;
        self.log_skipped_nodes();
        Ok(self.system)
    }

    /// Pass 1: DataAggregate and BackingData node entries
    fn import_data_entities(&mut self) -> Result<()> {
        for (key, node) in &self.topology.node_templates {
            match node.type_name.as_str() {
                DATA_AGGREGATE_TYPE => {
                    let mut aggregate = DataAggregate::new(ids::generate(), to_label(key));
                    aggregate.metadata = node.metadata.clone().into();
                    self.key_id_map.add(key.clone(), aggregate.id.clone())?;
                    self.system.insert_data_aggregate(aggregate);
                }
                BACKING_DATA_TYPE => {
                    let mut backing = BackingData::new(ids::generate(), to_label(key));
                    backing.metadata = node.metadata.clone().into();
                    if let Some(serde_json::Value::Object(pairs)) =
                        node.properties.get(INCLUDED_DATA_PROPERTY)
                    {
                        for (data_key, value) in pairs {
                            backing.add_included_data(data_key.clone(), value.clone());
                        }
                    }
                    self.key_id_map.add(key.clone(), backing.id.clone())?;
                    self.system.insert_backing_data(backing);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Pass 2: Infrastructure node entries
    ///
    /// Host requirements between infrastructures are skipped here and
    /// picked up by [`Self::import_infrastructure_hosts`] once every
    /// Infrastructure is registered.
    fn import_infrastructures(&mut self) -> Result<()> {
        for (key, node) in &self.topology.node_templates {
            if node.type_name != INFRASTRUCTURE_TYPE {
                continue;
            }
            let mut infrastructure = Infrastructure::new(ids::generate(), to_label(key));
            infrastructure.metadata = node.metadata.clone().into();
            infrastructure.properties = node.properties.clone().into();
            for assignment in &node.requirements {
                for (name, target) in assignment.iter() {
                    if name == USES_BACKING_DATA {
                        let data_use = self.resolve_backing_data_use(key, target, 2)?;
                        infrastructure.add_backing_data_use(data_use);
                    }
                }
            }
            self.key_id_map
                .add(key.clone(), infrastructure.id.clone())?;
            self.system.insert_infrastructure(infrastructure);
        }
        Ok(())
    }

    /// Pass 3: parse endpoint nodes into the staging table
    ///
    /// Properties come from the node's own property bag with the matching
    /// capability block merged over it.
    fn stage_endpoints(&mut self) -> Result<()> {
        for (key, node) in &self.topology.node_templates {
            let kind = match endpoint_kind_for(&node.type_name) {
                Some(kind) => kind,
                None => continue,
            };
            let mut endpoint = Endpoint::new(ids::generate(), kind, to_label(key));
            endpoint.metadata = node.metadata.clone().into();
            let mut properties = node.properties.clone();
            if let Some(capability) = node.capabilities.get(endpoint_capability_name(kind)) {
                properties.extend(capability.properties.clone());
            }
            endpoint.properties = properties.into();
            self.key_id_map.add(key.clone(), endpoint.id.clone())?;
            self.staged_endpoints.insert(endpoint.id.clone(), endpoint);
        }
        Ok(())
    }

    /// Pass 4: Component node entries and the requirements hanging off them
    fn import_components(&mut self) -> Result<()> {
        for (key, node) in &self.topology.node_templates {
            let kind = match component_kind_for(&node.type_name) {
                Some(kind) => kind,
                None => continue,
            };
            let mut component = Component::new(ids::generate(), kind, to_label(key));
            component.metadata = node.metadata.clone().into();
            component.properties = node.properties.clone().into();
            for assignment in &node.requirements {
                for (name, target) in assignment.iter() {
                    match name {
                        USES_DATA => {
                            let data_use = self.resolve_aggregate_use(key, target, 4)?;
                            component.add_data_aggregate_use(data_use);
                        }
                        USES_BACKING_DATA => {
                            let data_use = self.resolve_backing_data_use(key, target, 4)?;
                            component.add_backing_data_use(data_use);
                        }
                        PROVIDES_ENDPOINT => {
                            self.claim_endpoint(
                                key,
                                target,
                                EndpointKind::Internal,
                                &mut component,
                            )?;
                        }
                        PROVIDES_EXTERNAL_ENDPOINT => {
                            self.claim_endpoint(
                                key,
                                target,
                                EndpointKind::External,
                                &mut component,
                            )?;
                        }
                        HOST => {
                            self.import_host_requirement(key, &component.id, target)?;
                        }
                        ENDPOINT_LINK => {
                            self.import_link_requirement(key, &component.id, target)?;
                        }
                        _ => {}
                    }
                }
            }
            self.key_id_map.add(key.clone(), component.id.clone())?;
            self.system.insert_component(component);
        }
        Ok(())
    }

    /// Pass 4 tail: host requirements on Infrastructure nodes
    fn import_infrastructure_hosts(&mut self) -> Result<()> {
        for (key, node) in &self.topology.node_templates {
            if node.type_name != INFRASTRUCTURE_TYPE {
                continue;
            }
            let deployed_id = self.key_id_map.id_of(key)?.to_string();
            for assignment in &node.requirements {
                for (name, target) in assignment.iter() {
                    if name == HOST {
                        self.import_host_requirement(key, &deployed_id, target)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Endpoints no component claimed still enter the graph, unowned
    fn adopt_unclaimed_endpoints(&mut self) {
        if self.staged_endpoints.is_empty() {
            return;
        }
        debug!(
            count = self.staged_endpoints.len(),
            "Adopting endpoints no component claimed"
        );
        for (_, endpoint) in std::mem::take(&mut self.staged_endpoints) {
            self.system.insert_endpoint(endpoint);
        }
    }

    /// Pass 5: copy relationship entry properties onto the entity each
    /// key was registered for
    fn backfill_relationship_properties(&mut self) -> Result<()> {
        for (key, relationship) in &self.topology.relationship_templates {
            if relationship.properties.is_empty() {
                continue;
            }
            match relationship.type_name.as_str() {
                HOSTED_ON_TYPE => {
                    let id = self.relationship_entity_id(key, &relationship.type_name)?;
                    let mapping = self.system.get_deployment_mapping_mut(&id)?;
                    mapping.properties = relationship.properties.clone().into();
                }
                CONNECTS_TO_TYPE => {
                    let id = self.relationship_entity_id(key, &relationship.type_name)?;
                    let link = self.system.get_link_mut(&id)?;
                    link.properties = relationship.properties.clone().into();
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Pass 6: RequestTrace node entries
    ///
    /// The structural properties resolve to entity references; whatever
    /// remains stays in the trace's property bag.
    fn import_request_traces(&mut self) -> Result<()> {
        for (key, node) in &self.topology.node_templates {
            if node.type_name != REQUEST_TRACE_TYPE {
                continue;
            }
            let mut trace = RequestTrace::new(ids::generate(), to_label(key));
            trace.metadata = node.metadata.clone().into();
            let mut properties = node.properties.clone();
            properties.remove(NODES_PROPERTY);
            if let Some(value) = properties.remove(REFERRED_ENDPOINT_PROPERTY) {
                trace.external_endpoint_id = Some(self.resolve_trace_endpoint(key, &value)?);
            }
            if let Some(value) = properties.remove(INVOLVED_LINKS_PROPERTY) {
                for link_id in self.resolve_trace_links(key, &value)? {
                    trace.add_link_id(link_id);
                }
            }
            trace.properties = properties.into();
            self.system.insert_request_trace(trace);
        }
        Ok(())
    }

    /// Note nodes whose type no pass handles
    fn log_skipped_nodes(&self) {
        for (key, node) in &self.topology.node_templates {
            if !is_known_node_type(&node.type_name) {
                debug!(node = %key, node_type = %node.type_name, "Skipping node of unknown type");
            }
        }
    }

    /// Claim a staged endpoint for a component
    ///
    /// Each endpoint node may be claimed exactly once across the document.
    fn claim_endpoint(
        &mut self,
        node_key: &str,
        target: &RequirementTarget,
        expected_kind: EndpointKind,
        component: &mut Component,
    ) -> Result<()> {
        let requirement = match expected_kind {
            EndpointKind::Internal => PROVIDES_ENDPOINT,
            EndpointKind::External => PROVIDES_EXTERNAL_ENDPOINT,
        };
        let (endpoint_key, _) = require_extended(node_key, requirement, target)?;
        let endpoint_id = self.resolve_target_id(node_key, requirement, endpoint_key, 4)?;
        let endpoint = match self.staged_endpoints.remove(&endpoint_id) {
            Some(endpoint) => endpoint,
            None => {
                if self.system.endpoint_exists(&endpoint_id) {
                    let first_node_key = self
                        .system
                        .search_owner_of_endpoint(&endpoint_id)
                        .and_then(|owner| self.key_id_map.key_of(&owner.id).ok())
                        .unwrap_or(node_key)
                        .to_string();
                    return Err(ToscaError::EndpointClaimedTwice {
                        endpoint_key: endpoint_key.to_string(),
                        first_node_key,
                        second_node_key: node_key.to_string(),
                    });
                }
                return Err(wrong_target(
                    node_key,
                    requirement,
                    endpoint_key,
                    "an endpoint node",
                ));
            }
        };
        if endpoint.kind != expected_kind {
            let expected = match expected_kind {
                EndpointKind::Internal => "an internal endpoint node",
                EndpointKind::External => "an external endpoint node",
            };
            return Err(wrong_target(node_key, requirement, endpoint_key, expected));
        }
        component.add_endpoint_id(endpoint.id.clone());
        self.system.insert_endpoint(endpoint);
        Ok(())
    }

    /// Resolve a host requirement into a DeploymentMapping
    ///
    /// The relationship entry key becomes the mapping's registered key so
    /// pass 5 can back-fill its properties.
    fn import_host_requirement(
        &mut self,
        node_key: &str,
        deployed_id: &str,
        target: &RequirementTarget,
    ) -> Result<()> {
        let (host_key, relationship) = require_extended(node_key, HOST, target)?;
        let infrastructure_id = self.resolve_target_id(node_key, HOST, host_key, 4)?;
        if !self.system.infrastructure_exists(&infrastructure_id) {
            return Err(wrong_target(
                node_key,
                HOST,
                host_key,
                "an Infrastructure node",
            ));
        }
        let relationship_key = require_relationship_key(node_key, HOST, relationship)?;
        let mapping = DeploymentMapping::new(
            ids::generate(),
            deployed_id.to_string(),
            infrastructure_id,
        );
        self.key_id_map
            .add(relationship_key.to_string(), mapping.id.clone())?;
        self.system.insert_deployment_mapping(mapping);
        Ok(())
    }

    /// Resolve an endpoint_link requirement into a Link
    fn import_link_requirement(
        &mut self,
        node_key: &str,
        source_id: &str,
        target: &RequirementTarget,
    ) -> Result<()> {
        let (endpoint_key, relationship) = require_extended(node_key, ENDPOINT_LINK, target)?;
        let endpoint_id = self.resolve_target_id(node_key, ENDPOINT_LINK, endpoint_key, 4)?;
        if !self.staged_endpoints.contains_key(&endpoint_id)
            && !self.system.endpoint_exists(&endpoint_id)
        {
            return Err(wrong_target(
                node_key,
                ENDPOINT_LINK,
                endpoint_key,
                "an endpoint node",
            ));
        }
        let relationship_key = require_relationship_key(node_key, ENDPOINT_LINK, relationship)?;
        let link = Link::new(ids::generate(), source_id.to_string(), endpoint_id);
        self.key_id_map
            .add(relationship_key.to_string(), link.id.clone())?;
        self.system.insert_link(link);
        Ok(())
    }

    /// Resolve uses_data to a DataAggregate reference
    fn resolve_aggregate_use(
        &self,
        node_key: &str,
        target: &RequirementTarget,
        pass: u8,
    ) -> Result<DataUse> {
        let data_use = self.resolve_data_use(node_key, USES_DATA, target, pass)?;
        if self.system.get_data_aggregate(&data_use.data_id).is_err() {
            return Err(wrong_target(
                node_key,
                USES_DATA,
                target_node_key(target),
                "a DataAggregate node",
            ));
        }
        Ok(data_use)
    }

    /// Resolve uses_backing_data to a BackingData reference
    fn resolve_backing_data_use(
        &self,
        node_key: &str,
        target: &RequirementTarget,
        pass: u8,
    ) -> Result<DataUse> {
        let data_use = self.resolve_data_use(node_key, USES_BACKING_DATA, target, pass)?;
        if self.system.get_backing_data(&data_use.data_id).is_err() {
            return Err(wrong_target(
                node_key,
                USES_BACKING_DATA,
                target_node_key(target),
                "a BackingData node",
            ));
        }
        Ok(data_use)
    }

    /// Resolve a data requirement to the referenced id and usage label
    ///
    /// The shorthand form and a structured form without a named
    /// relationship both yield an empty label.
    fn resolve_data_use(
        &self,
        node_key: &str,
        requirement: &str,
        target: &RequirementTarget,
        pass: u8,
    ) -> Result<DataUse> {
        let target_key = target_node_key(target);
        let data_id = self.resolve_target_id(node_key, requirement, target_key, pass)?;
        let label = match target {
            RequirementTarget::Node(_) => String::new(),
            RequirementTarget::Extended { relationship, .. } => {
                self.usage_relation_of(node_key, requirement, relationship.as_ref())?
            }
        };
        Ok(DataUse::new(data_id, label))
    }

    /// Read the usage_relation property off a referenced relationship entry
    fn usage_relation_of(
        &self,
        node_key: &str,
        requirement: &str,
        relationship: Option<&RelationshipRef>,
    ) -> Result<String> {
        let relationship_key = match relationship {
            Some(RelationshipRef::Template(key)) => key,
            Some(RelationshipRef::Inline { .. }) | None => return Ok(String::new()),
        };
        let entry = self
            .topology
            .relationship_templates
            .get(relationship_key)
            .ok_or_else(|| ToscaError::UnknownRelationship {
                node_key: node_key.to_string(),
                requirement: requirement.to_string(),
                relationship_key: relationship_key.clone(),
            })?;
        let label = entry
            .properties
            .get(USAGE_RELATION_PROPERTY)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        Ok(label.to_string())
    }

    /// Map a requirement's target key to the id registered for it
    fn resolve_target_id(
        &self,
        node_key: &str,
        requirement: &str,
        target_key: &str,
        pass: u8,
    ) -> Result<String> {
        match self.key_id_map.id_of(target_key) {
            Ok(id) => Ok(id.to_string()),
            Err(_) => Err(ToscaError::UnresolvedRequirement {
                node_key: node_key.to_string(),
                requirement: requirement.to_string(),
                target: target_key.to_string(),
                pass,
            }),
        }
    }

    /// Id registered for a relationship entry, or the orphan error
    fn relationship_entity_id(&self, relationship_key: &str, type_name: &str) -> Result<String> {
        match self.key_id_map.id_of(relationship_key) {
            Ok(id) => Ok(id.to_string()),
            Err(_) => Err(ToscaError::OrphanRelationship {
                relationship_key: relationship_key.to_string(),
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Resolve referred_endpoint to an ExternalEndpoint id
    fn resolve_trace_endpoint(
        &self,
        node_key: &str,
        value: &serde_json::Value,
    ) -> Result<String> {
        let endpoint_key = match value.as_str() {
            Some(key) => key,
            None => {
                return Err(ToscaError::InvalidTraceProperty {
                    node_key: node_key.to_string(),
                    property: REFERRED_ENDPOINT_PROPERTY.to_string(),
                })
            }
        };
        let endpoint_id =
            self.resolve_trace_reference(node_key, REFERRED_ENDPOINT_PROPERTY, endpoint_key)?;
        match self.system.get_endpoint(&endpoint_id) {
            Ok(endpoint) if endpoint.is_external() => Ok(endpoint_id),
            _ => Err(wrong_target(
                node_key,
                REFERRED_ENDPOINT_PROPERTY,
                endpoint_key,
                "an external endpoint node",
            )),
        }
    }

    /// Resolve involved_links to Link ids, preserving document order
    fn resolve_trace_links(
        &self,
        node_key: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<String>> {
        let entries = match value.as_array() {
            Some(entries) => entries,
            None => {
                return Err(ToscaError::InvalidTraceProperty {
                    node_key: node_key.to_string(),
                    property: INVOLVED_LINKS_PROPERTY.to_string(),
                })
            }
        };
        let mut link_ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let link_key = match entry.as_str() {
                Some(key) => key,
                None => {
                    return Err(ToscaError::InvalidTraceProperty {
                        node_key: node_key.to_string(),
                        property: INVOLVED_LINKS_PROPERTY.to_string(),
                    })
                }
            };
            let link_id =
                self.resolve_trace_reference(node_key, INVOLVED_LINKS_PROPERTY, link_key)?;
            if self.system.get_link(&link_id).is_err() {
                return Err(wrong_target(
                    node_key,
                    INVOLVED_LINKS_PROPERTY,
                    link_key,
                    "a Link relationship",
                ));
            }
            link_ids.push(link_id);
        }
        Ok(link_ids)
    }

    /// Map a trace property key reference to a registered id
    fn resolve_trace_reference(
        &self,
        node_key: &str,
        property: &str,
        target: &str,
    ) -> Result<String> {
        match self.key_id_map.id_of(target) {
            Ok(id) => Ok(id.to_string()),
            Err(_) => Err(ToscaError::UnresolvedTraceReference {
                node_key: node_key.to_string(),
                property: property.to_string(),
                target: target.to_string(),
            }),
        }
    }
}

/// Extract the node key of a requirement target
fn target_node_key(target: &RequirementTarget) -> &str {
    match target {
        RequirementTarget::Node(key) => key,
        RequirementTarget::Extended { node, .. } => node,
    }
}

/// Reject the shorthand form for requirements that need more than a key
fn require_extended<'t>(
    node_key: &str,
    requirement: &str,
    target: &'t RequirementTarget,
) -> Result<(&'t str, Option<&'t RelationshipRef>)> {
    match target {
        RequirementTarget::Extended {
            node, relationship, ..
        } => Ok((node.as_str(), relationship.as_ref())),
        RequirementTarget::Node(_) => Err(ToscaError::UnsupportedShortForm {
            node_key: node_key.to_string(),
            requirement: requirement.to_string(),
        }),
    }
}

/// Require a named relationship entry on a structured requirement
fn require_relationship_key<'t>(
    node_key: &str,
    requirement: &str,
    relationship: Option<&'t RelationshipRef>,
) -> Result<&'t str> {
    match relationship {
        Some(RelationshipRef::Template(key)) => Ok(key.as_str()),
        Some(RelationshipRef::Inline { .. }) | None => Err(ToscaError::MissingRequirementField {
            node_key: node_key.to_string(),
            requirement: requirement.to_string(),
            field: "relationship".to_string(),
        }),
    }
}

fn wrong_target(
    node_key: &str,
    reference: &str,
    target: &str,
    expected: &'static str,
) -> ToscaError {
    ToscaError::WrongTargetKind {
        node_key: node_key.to_string(),
        reference: reference.to_string(),
        target: target.to_string(),
        expected,
    }
}

fn is_known_node_type(type_name: &str) -> bool {
    matches!(
        type_name,
        DATA_AGGREGATE_TYPE | BACKING_DATA_TYPE | INFRASTRUCTURE_TYPE | REQUEST_TRACE_TYPE
    ) || component_kind_for(type_name).is_some()
        || endpoint_kind_for(type_name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_name_strips_from_first_dot() {
        assert_eq!(system_name_from("shop.tosca.yaml"), "shop");
        assert_eq!(system_name_from("shop"), "shop");
        assert_eq!(system_name_from(".hidden"), "");
    }

    #[test]
    fn test_require_extended_rejects_shorthand() {
        let target = RequirementTarget::Node("http_api".to_string());

        let result = require_extended("gateway", PROVIDES_ENDPOINT, &target);

        assert!(matches!(
            result,
            Err(ToscaError::UnsupportedShortForm { .. })
        ));
    }

    #[test]
    fn test_require_relationship_key_rejects_inline() {
        let inline = RelationshipRef::Inline {
            type_name: HOSTED_ON_TYPE.to_string(),
        };

        let result = require_relationship_key("gateway", HOST, Some(&inline));

        assert!(matches!(
            result,
            Err(ToscaError::MissingRequirementField { ref field, .. }) if field == "relationship"
        ));
    }
}
