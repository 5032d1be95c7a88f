mod common;

use archex_core::{validate_system, DataUse, EndpointKind, ModelError};
use common::{
    create_test_aggregate, create_test_endpoint, create_test_infrastructure, create_test_link,
    create_test_service, create_test_trace, new_system,
};

#[test]
fn test_connected_system_validates() {
    // GIVEN a system wiring every reference kind correctly
    let mut system = new_system();
    let aggregate_id = create_test_aggregate(&mut system, "Order");
    let gateway_id = create_test_service(&mut system, "Gateway");
    let service_id = create_test_service(&mut system, "Order Service");
    let entry_id = create_test_endpoint(
        &mut system,
        &gateway_id,
        EndpointKind::External,
        "Storefront",
    );
    let api_id = create_test_endpoint(&mut system, &service_id, EndpointKind::Internal, "API");
    let link_id = create_test_link(&mut system, &gateway_id, &api_id);
    create_test_trace(&mut system, "Checkout", Some(entry_id), vec![link_id]);
    system
        .get_component_mut(&service_id)
        .expect("Service should exist")
        .add_data_aggregate_use(DataUse::unlabeled(aggregate_id));

    // WHEN validating
    // THEN no violation is found
    validate_system(&system).expect("Should validate a fully connected system");
}

#[test]
fn test_dangling_data_use_is_reported() {
    // GIVEN a component referencing an aggregate that was never inserted
    let mut system = new_system();
    let service_id = create_test_service(&mut system, "Order Service");
    system
        .get_component_mut(&service_id)
        .expect("Service should exist")
        .add_data_aggregate_use(DataUse::unlabeled("missing-aggregate".to_string()));

    // WHEN validating
    let result = validate_system(&system);

    // THEN the dangling reference is named
    assert!(matches!(
        result,
        Err(ModelError::DanglingDataUse { ref data_id, .. }) if data_id == "missing-aggregate"
    ));
}

#[test]
fn test_dangling_link_source_is_reported() {
    // GIVEN a link whose source component is gone
    let mut system = new_system();
    let service_id = create_test_service(&mut system, "Order Service");
    let api_id = create_test_endpoint(&mut system, &service_id, EndpointKind::Internal, "API");
    create_test_link(&mut system, "missing-component", &api_id);

    // WHEN validating
    let result = validate_system(&system);

    // THEN the broken source is reported
    assert!(matches!(
        result,
        Err(ModelError::DanglingLinkSource { ref source_id, .. })
            if source_id == "missing-component"
    ));
}

#[test]
fn test_trace_with_internal_entry_endpoint_is_reported() {
    // GIVEN a trace entering through an internal endpoint
    let mut system = new_system();
    let service_id = create_test_service(&mut system, "Order Service");
    let api_id = create_test_endpoint(&mut system, &service_id, EndpointKind::Internal, "API");
    create_test_trace(&mut system, "Checkout", Some(api_id), Vec::new());

    // WHEN validating
    let result = validate_system(&system);

    // THEN the endpoint kind violation is reported
    assert!(matches!(
        result,
        Err(ModelError::TraceEndpointNotExternal { .. })
    ));
}

#[test]
fn test_trace_with_missing_link_is_reported() {
    // GIVEN a trace walking a link that does not exist
    let mut system = new_system();
    create_test_trace(
        &mut system,
        "Checkout",
        None,
        vec!["missing-link".to_string()],
    );

    // WHEN validating
    let result = validate_system(&system);

    // THEN the dangling link reference is reported
    assert!(matches!(
        result,
        Err(ModelError::DanglingTraceLink { ref link_id, .. }) if link_id == "missing-link"
    ));
}

#[test]
fn test_dangling_hosted_by_is_reported() {
    // GIVEN an infrastructure hosted by one that does not exist
    let mut system = new_system();
    let cluster_id = create_test_infrastructure(&mut system, "Cluster");
    system
        .get_infrastructure_mut(&cluster_id)
        .expect("Cluster should exist")
        .hosted_by = Some("missing-platform".to_string());

    // WHEN validating
    let result = validate_system(&system);

    // THEN the broken host reference is reported
    assert!(matches!(
        result,
        Err(ModelError::DanglingHostedBy { ref hosted_by_id, .. })
            if hosted_by_id == "missing-platform"
    ));
}

#[test]
fn test_deployment_of_missing_entity_is_reported() {
    // GIVEN a mapping deploying an entity that exists in no collection
    let mut system = new_system();
    let cluster_id = create_test_infrastructure(&mut system, "Cluster");
    system.insert_deployment_mapping(archex_core::DeploymentMapping::new(
        "mapping-1".to_string(),
        "missing-service".to_string(),
        cluster_id,
    ));

    // WHEN validating
    let result = validate_system(&system);

    // THEN the missing deployed entity is reported
    assert!(matches!(
        result,
        Err(ModelError::DeployedEntityNotFound { ref deployed_id, .. })
            if deployed_id == "missing-service"
    ));
}
