use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Result};
use crate::model::{
    BackingData, Component, DataAggregate, DeploymentMapping, Endpoint, Infrastructure, Link,
    RequestTrace,
};

/// The entity graph of one modeled architecture
///
/// A named aggregate owning disjoint, id-keyed collections of entities.
/// Not thread-safe (no Arc/RwLock) - each conversion or edit session works
/// on its own System value. Collections are BTreeMaps so iteration, and
/// with it every export pass, is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    /// Display name of the modeled system
    pub name: String,
    /// Map of DataAggregate id to entity
    pub(crate) data_aggregates: BTreeMap<String, DataAggregate>,
    /// Map of BackingData id to entity
    pub(crate) backing_data: BTreeMap<String, BackingData>,
    /// Map of Infrastructure id to entity
    pub(crate) infrastructures: BTreeMap<String, Infrastructure>,
    /// Map of Component id to entity
    pub(crate) components: BTreeMap<String, Component>,
    /// Map of Endpoint id to entity (internal and external)
    pub(crate) endpoints: BTreeMap<String, Endpoint>,
    /// Map of DeploymentMapping id to entity
    pub(crate) deployment_mappings: BTreeMap<String, DeploymentMapping>,
    /// Map of Link id to entity
    pub(crate) links: BTreeMap<String, Link>,
    /// Map of RequestTrace id to entity
    pub(crate) request_traces: BTreeMap<String, RequestTrace>,
}

impl System {
    /// Create a new empty System with the given display name
    pub fn new(name: String) -> Self {
        Self {
            name,
            data_aggregates: BTreeMap::new(),
            backing_data: BTreeMap::new(),
            infrastructures: BTreeMap::new(),
            components: BTreeMap::new(),
            endpoints: BTreeMap::new(),
            deployment_mappings: BTreeMap::new(),
            links: BTreeMap::new(),
            request_traces: BTreeMap::new(),
        }
    }

    // ===== DataAggregate =====

    /// Get a DataAggregate by id
    ///
    /// # Errors
    /// Returns `DataAggregateNotFound` if no entity has this id.
    pub fn get_data_aggregate(&self, id: &str) -> Result<&DataAggregate> {
        self.data_aggregates
            .get(id)
            .ok_or_else(|| ModelError::DataAggregateNotFound {
                data_aggregate_id: id.to_string(),
            })
    }

    /// Insert a DataAggregate into the system
    pub fn insert_data_aggregate(&mut self, data_aggregate: DataAggregate) {
        self.data_aggregates
            .insert(data_aggregate.id.clone(), data_aggregate);
    }

    /// Iterate all DataAggregates in id order
    pub fn data_aggregates(&self) -> impl Iterator<Item = &DataAggregate> {
        self.data_aggregates.values()
    }

    // ===== BackingData =====

    /// Get a BackingData by id
    ///
    /// # Errors
    /// Returns `BackingDataNotFound` if no entity has this id.
    pub fn get_backing_data(&self, id: &str) -> Result<&BackingData> {
        self.backing_data
            .get(id)
            .ok_or_else(|| ModelError::BackingDataNotFound {
                backing_data_id: id.to_string(),
            })
    }

    /// Insert a BackingData into the system
    pub fn insert_backing_data(&mut self, backing_data: BackingData) {
        self.backing_data
            .insert(backing_data.id.clone(), backing_data);
    }

    /// Iterate all BackingData entities in id order
    pub fn backing_data(&self) -> impl Iterator<Item = &BackingData> {
        self.backing_data.values()
    }

    // ===== Infrastructure =====

    /// Get an Infrastructure by id
    ///
    /// # Errors
    /// Returns `InfrastructureNotFound` if no entity has this id.
    pub fn get_infrastructure(&self, id: &str) -> Result<&Infrastructure> {
        self.infrastructures
            .get(id)
            .ok_or_else(|| ModelError::InfrastructureNotFound {
                infrastructure_id: id.to_string(),
            })
    }

    /// Get a mutable reference to an Infrastructure by id
    ///
    /// # Errors
    /// Returns `InfrastructureNotFound` if no entity has this id.
    pub fn get_infrastructure_mut(&mut self, id: &str) -> Result<&mut Infrastructure> {
        self.infrastructures
            .get_mut(id)
            .ok_or_else(|| ModelError::InfrastructureNotFound {
                infrastructure_id: id.to_string(),
            })
    }

    /// Insert an Infrastructure into the system
    pub fn insert_infrastructure(&mut self, infrastructure: Infrastructure) {
        self.infrastructures
            .insert(infrastructure.id.clone(), infrastructure);
    }

    /// Iterate all Infrastructures in id order
    pub fn infrastructures(&self) -> impl Iterator<Item = &Infrastructure> {
        self.infrastructures.values()
    }

    /// Check if an Infrastructure exists
    pub fn infrastructure_exists(&self, id: &str) -> bool {
        self.infrastructures.contains_key(id)
    }

    // ===== Component =====

    /// Get a Component by id
    ///
    /// # Errors
    /// Returns `ComponentNotFound` if no entity has this id.
    pub fn get_component(&self, id: &str) -> Result<&Component> {
        self.components
            .get(id)
            .ok_or_else(|| ModelError::ComponentNotFound {
                component_id: id.to_string(),
            })
    }

    /// Get a mutable reference to a Component by id
    ///
    /// # Errors
    /// Returns `ComponentNotFound` if no entity has this id.
    pub fn get_component_mut(&mut self, id: &str) -> Result<&mut Component> {
        self.components
            .get_mut(id)
            .ok_or_else(|| ModelError::ComponentNotFound {
                component_id: id.to_string(),
            })
    }

    /// Insert a Component into the system
    pub fn insert_component(&mut self, component: Component) {
        self.components.insert(component.id.clone(), component);
    }

    /// Iterate all Components in id order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Check if a Component exists
    pub fn component_exists(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Find the Component owning the given Endpoint, if any
    ///
    /// Ownership is recorded on the Component side only, so this is a
    /// search over all components.
    pub fn search_owner_of_endpoint(&self, endpoint_id: &str) -> Option<&Component> {
        self.components
            .values()
            .find(|component| component.endpoint_ids.iter().any(|id| id == endpoint_id))
    }

    // ===== Endpoint =====

    /// Get an Endpoint by id
    ///
    /// # Errors
    /// Returns `EndpointNotFound` if no entity has this id.
    pub fn get_endpoint(&self, id: &str) -> Result<&Endpoint> {
        self.endpoints
            .get(id)
            .ok_or_else(|| ModelError::EndpointNotFound {
                endpoint_id: id.to_string(),
            })
    }

    /// Insert an Endpoint into the system
    pub fn insert_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoints.insert(endpoint.id.clone(), endpoint);
    }

    /// Iterate all Endpoints in id order
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    /// Check if an Endpoint exists
    pub fn endpoint_exists(&self, id: &str) -> bool {
        self.endpoints.contains_key(id)
    }

    // ===== DeploymentMapping =====

    /// Get a DeploymentMapping by id
    ///
    /// # Errors
    /// Returns `DeploymentMappingNotFound` if no entity has this id.
    pub fn get_deployment_mapping(&self, id: &str) -> Result<&DeploymentMapping> {
        self.deployment_mappings
            .get(id)
            .ok_or_else(|| ModelError::DeploymentMappingNotFound {
                deployment_mapping_id: id.to_string(),
            })
    }

    /// Get a mutable reference to a DeploymentMapping by id
    ///
    /// # Errors
    /// Returns `DeploymentMappingNotFound` if no entity has this id.
    pub fn get_deployment_mapping_mut(&mut self, id: &str) -> Result<&mut DeploymentMapping> {
        self.deployment_mappings
            .get_mut(id)
            .ok_or_else(|| ModelError::DeploymentMappingNotFound {
                deployment_mapping_id: id.to_string(),
            })
    }

    /// Insert a DeploymentMapping into the system
    pub fn insert_deployment_mapping(&mut self, mapping: DeploymentMapping) {
        self.deployment_mappings.insert(mapping.id.clone(), mapping);
    }

    /// Iterate all DeploymentMappings in id order
    pub fn deployment_mappings(&self) -> impl Iterator<Item = &DeploymentMapping> {
        self.deployment_mappings.values()
    }

    // ===== Link =====

    /// Get a Link by id
    ///
    /// # Errors
    /// Returns `LinkNotFound` if no entity has this id.
    pub fn get_link(&self, id: &str) -> Result<&Link> {
        self.links.get(id).ok_or_else(|| ModelError::LinkNotFound {
            link_id: id.to_string(),
        })
    }

    /// Get a mutable reference to a Link by id
    ///
    /// # Errors
    /// Returns `LinkNotFound` if no entity has this id.
    pub fn get_link_mut(&mut self, id: &str) -> Result<&mut Link> {
        self.links
            .get_mut(id)
            .ok_or_else(|| ModelError::LinkNotFound {
                link_id: id.to_string(),
            })
    }

    /// Insert a Link into the system
    pub fn insert_link(&mut self, link: Link) {
        self.links.insert(link.id.clone(), link);
    }

    /// Iterate all Links in id order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    // ===== RequestTrace =====

    /// Get a RequestTrace by id
    ///
    /// # Errors
    /// Returns `RequestTraceNotFound` if no entity has this id.
    pub fn get_request_trace(&self, id: &str) -> Result<&RequestTrace> {
        self.request_traces
            .get(id)
            .ok_or_else(|| ModelError::RequestTraceNotFound {
                request_trace_id: id.to_string(),
            })
    }

    /// Insert a RequestTrace into the system
    pub fn insert_request_trace(&mut self, trace: RequestTrace) {
        self.request_traces.insert(trace.id.clone(), trace);
    }

    /// Iterate all RequestTraces in id order
    pub fn request_traces(&self) -> impl Iterator<Item = &RequestTrace> {
        self.request_traces.values()
    }
}
