use archex_core::{
    ids, BackingData, Component, ComponentKind, DataAggregate, DeploymentMapping, Endpoint,
    EndpointKind, Infrastructure, Link, RequestTrace, System,
};
use archex_tosca::template::{NodeTemplate, RequirementTarget};

/// Create a new empty System for testing
#[allow(dead_code)]
pub fn new_system() -> System {
    System::new("test-system".to_string())
}

/// Create a Component of the given kind and insert it
#[allow(dead_code)]
pub fn create_component(system: &mut System, kind: ComponentKind, name: &str) -> String {
    let component = Component::new(ids::generate(), kind, name.to_string());
    let id = component.id.clone();
    system.insert_component(component);
    id
}

/// Create an Endpoint owned by the given Component and insert both sides
#[allow(dead_code)]
pub fn create_endpoint(
    system: &mut System,
    component_id: &str,
    kind: EndpointKind,
    name: &str,
) -> String {
    let endpoint = Endpoint::new(ids::generate(), kind, name.to_string());
    let id = endpoint.id.clone();
    system.insert_endpoint(endpoint);
    let component = system
        .get_component_mut(component_id)
        .expect("Component should exist for endpoint setup");
    component.add_endpoint_id(id.clone());
    id
}

/// Create an Infrastructure entity and insert it
#[allow(dead_code)]
pub fn create_infrastructure(system: &mut System, name: &str) -> String {
    let infrastructure = Infrastructure::new(ids::generate(), name.to_string());
    let id = infrastructure.id.clone();
    system.insert_infrastructure(infrastructure);
    id
}

/// Create a DataAggregate entity and insert it
#[allow(dead_code)]
pub fn create_data_aggregate(system: &mut System, name: &str) -> String {
    let aggregate = DataAggregate::new(ids::generate(), name.to_string());
    let id = aggregate.id.clone();
    system.insert_data_aggregate(aggregate);
    id
}

/// Create a BackingData entity and insert it
#[allow(dead_code)]
pub fn create_backing_data(system: &mut System, name: &str) -> String {
    let backing = BackingData::new(ids::generate(), name.to_string());
    let id = backing.id.clone();
    system.insert_backing_data(backing);
    id
}

/// Create a Link from a Component to an Endpoint and insert it
#[allow(dead_code)]
pub fn create_link(system: &mut System, source_id: &str, endpoint_id: &str) -> String {
    let link = Link::new(
        ids::generate(),
        source_id.to_string(),
        endpoint_id.to_string(),
    );
    let id = link.id.clone();
    system.insert_link(link);
    id
}

/// Create a DeploymentMapping and insert it
#[allow(dead_code)]
pub fn create_deployment_mapping(
    system: &mut System,
    deployed_id: &str,
    infrastructure_id: &str,
) -> String {
    let mapping = DeploymentMapping::new(
        ids::generate(),
        deployed_id.to_string(),
        infrastructure_id.to_string(),
    );
    let id = mapping.id.clone();
    system.insert_deployment_mapping(mapping);
    id
}

/// Create a RequestTrace referencing the given endpoint and links
#[allow(dead_code)]
pub fn create_request_trace(
    system: &mut System,
    name: &str,
    external_endpoint_id: Option<String>,
    link_ids: Vec<String>,
) -> String {
    let mut trace = RequestTrace::new(ids::generate(), name.to_string());
    trace.external_endpoint_id = external_endpoint_id;
    for link_id in link_ids {
        trace.add_link_id(link_id);
    }
    let id = trace.id.clone();
    system.insert_request_trace(trace);
    id
}

/// Find the first target assigned under the given requirement name
#[allow(dead_code)]
pub fn find_requirement<'a>(node: &'a NodeTemplate, name: &str) -> Option<&'a RequirementTarget> {
    node.requirements
        .iter()
        .flat_map(|assignment| assignment.iter())
        .find(|(entry_name, _)| *entry_name == name)
        .map(|(_, target)| target)
}

/// Collect every target assigned under the given requirement name
#[allow(dead_code)]
pub fn requirement_targets<'a>(node: &'a NodeTemplate, name: &str) -> Vec<&'a RequirementTarget> {
    node.requirements
        .iter()
        .flat_map(|assignment| assignment.iter())
        .filter(|(entry_name, _)| *entry_name == name)
        .map(|(_, target)| target)
        .collect()
}

/// The node key a requirement target points at, whichever form it uses
#[allow(dead_code)]
pub fn target_node(target: &RequirementTarget) -> &str {
    match target {
        RequirementTarget::Node(key) => key,
        RequirementTarget::Extended { node, .. } => node,
    }
}
