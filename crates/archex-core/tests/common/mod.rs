use archex_core::{
    ids, Component, ComponentKind, DataAggregate, Endpoint, EndpointKind, Infrastructure, Link,
    RequestTrace, System,
};

/// Create a new empty System for testing
#[allow(dead_code)]
pub fn new_system() -> System {
    System::new("shop".to_string())
}

/// Create a Service component and insert it
#[allow(dead_code)]
pub fn create_test_service(system: &mut System, name: &str) -> String {
    let component = Component::new(ids::generate(), ComponentKind::Service, name.to_string());
    let id = component.id.clone();
    system.insert_component(component);
    id
}

/// Create an Endpoint owned by the given Component
#[allow(dead_code)]
pub fn create_test_endpoint(
    system: &mut System,
    component_id: &str,
    kind: EndpointKind,
    name: &str,
) -> String {
    let endpoint = Endpoint::new(ids::generate(), kind, name.to_string());
    let id = endpoint.id.clone();
    system.insert_endpoint(endpoint);
    system
        .get_component_mut(component_id)
        .expect("Component should exist for endpoint setup")
        .add_endpoint_id(id.clone());
    id
}

/// Create an Infrastructure entity and insert it
#[allow(dead_code)]
pub fn create_test_infrastructure(system: &mut System, name: &str) -> String {
    let infrastructure = Infrastructure::new(ids::generate(), name.to_string());
    let id = infrastructure.id.clone();
    system.insert_infrastructure(infrastructure);
    id
}

/// Create a DataAggregate entity and insert it
#[allow(dead_code)]
pub fn create_test_aggregate(system: &mut System, name: &str) -> String {
    let aggregate = DataAggregate::new(ids::generate(), name.to_string());
    let id = aggregate.id.clone();
    system.insert_data_aggregate(aggregate);
    id
}

/// Create a Link from a Component to an Endpoint and insert it
#[allow(dead_code)]
pub fn create_test_link(system: &mut System, source_id: &str, endpoint_id: &str) -> String {
    let link = Link::new(
        ids::generate(),
        source_id.to_string(),
        endpoint_id.to_string(),
    );
    let id = link.id.clone();
    system.insert_link(link);
    id
}

/// Create a RequestTrace and insert it
#[allow(dead_code)]
pub fn create_test_trace(
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
