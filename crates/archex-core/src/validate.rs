use crate::errors::{ModelError, Result};
use crate::model::{Component, DataUse};
use crate::system::System;

/// Validate referential integrity of a System
///
/// Checks that every reference held by an entity resolves to an entity
/// present in the same system, and that endpoint ownership is exclusive:
///
/// 1. Component/Infrastructure data uses point at existing
///    DataAggregates/BackingData
/// 2. Every Endpoint id listed by a Component exists, and no Endpoint is
///    listed by two Components
/// 3. Every Endpoint in the system is owned by some Component
/// 4. Link sources are Components, Link targets are Endpoints
/// 5. DeploymentMappings deploy an existing Component or Infrastructure
///    onto an existing Infrastructure
/// 6. Infrastructure hosted_by references resolve
/// 7. RequestTraces refer to an existing, external entry Endpoint and to
///    existing Links
///
/// # Errors
/// Returns the first violation encountered, in the order above.
pub fn validate_system(system: &System) -> Result<()> {
    check_data_uses(system)?;
    check_endpoint_ownership(system)?;
    check_links(system)?;
    check_deployment_mappings(system)?;
    check_hosted_by(system)?;
    check_request_traces(system)?;
    Ok(())
}

fn check_data_uses(system: &System) -> Result<()> {
    for component in system.components() {
        find_dangling_use(system, &component.id, &component.data_aggregate_uses, true)?;
        find_dangling_use(system, &component.id, &component.backing_data_uses, false)?;
    }
    for infrastructure in system.infrastructures() {
        find_dangling_use(
            system,
            &infrastructure.id,
            &infrastructure.backing_data_uses,
            false,
        )?;
    }
    Ok(())
}

fn find_dangling_use(
    system: &System,
    owner_id: &str,
    uses: &[DataUse],
    aggregate: bool,
) -> Result<()> {
    for data_use in uses {
        let found = if aggregate {
            system.get_data_aggregate(&data_use.data_id).is_ok()
        } else {
            system.get_backing_data(&data_use.data_id).is_ok()
        };
        if !found {
            return Err(ModelError::DanglingDataUse {
                owner_id: owner_id.to_string(),
                data_id: data_use.data_id.clone(),
            });
        }
    }
    Ok(())
}

fn check_endpoint_ownership(system: &System) -> Result<()> {
    for component in system.components() {
        for endpoint_id in &component.endpoint_ids {
            if !system.endpoint_exists(endpoint_id) {
                return Err(ModelError::DanglingEndpointOwnership {
                    component_id: component.id.clone(),
                    endpoint_id: endpoint_id.clone(),
                });
            }
            if let Some(other) = first_other_owner(system, component, endpoint_id) {
                return Err(ModelError::EndpointSharedByComponents {
                    endpoint_id: endpoint_id.clone(),
                    first_component_id: other.to_string(),
                    second_component_id: component.id.clone(),
                });
            }
        }
    }
    for endpoint in system.endpoints() {
        if system.search_owner_of_endpoint(&endpoint.id).is_none() {
            return Err(ModelError::EndpointUnowned {
                endpoint_id: endpoint.id.clone(),
            });
        }
    }
    Ok(())
}

/// Id of a component before `component` (in id order) also listing the endpoint
fn first_other_owner<'a>(
    system: &'a System,
    component: &Component,
    endpoint_id: &str,
) -> Option<&'a str> {
    system
        .components()
        .take_while(|other| other.id != component.id)
        .find(|other| other.endpoint_ids.iter().any(|id| id == endpoint_id))
        .map(|other| other.id.as_str())
}

fn check_links(system: &System) -> Result<()> {
    for link in system.links() {
        if !system.component_exists(&link.source_id) {
            return Err(ModelError::DanglingLinkSource {
                link_id: link.id.clone(),
                source_id: link.source_id.clone(),
            });
        }
        if !system.endpoint_exists(&link.target_endpoint_id) {
            return Err(ModelError::DanglingLinkTarget {
                link_id: link.id.clone(),
                target_endpoint_id: link.target_endpoint_id.clone(),
            });
        }
    }
    Ok(())
}

fn check_deployment_mappings(system: &System) -> Result<()> {
    for mapping in system.deployment_mappings() {
        let deployed_exists = system.component_exists(&mapping.deployed_id)
            || system.infrastructure_exists(&mapping.deployed_id);
        if !deployed_exists {
            return Err(ModelError::DeployedEntityNotFound {
                deployment_mapping_id: mapping.id.clone(),
                deployed_id: mapping.deployed_id.clone(),
            });
        }
        if !system.infrastructure_exists(&mapping.infrastructure_id) {
            return Err(ModelError::DeploymentHostNotFound {
                deployment_mapping_id: mapping.id.clone(),
                infrastructure_id: mapping.infrastructure_id.clone(),
            });
        }
    }
    Ok(())
}

fn check_hosted_by(system: &System) -> Result<()> {
    for infrastructure in system.infrastructures() {
        if let Some(hosted_by_id) = &infrastructure.hosted_by {
            if !system.infrastructure_exists(hosted_by_id) {
                return Err(ModelError::DanglingHostedBy {
                    infrastructure_id: infrastructure.id.clone(),
                    hosted_by_id: hosted_by_id.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_request_traces(system: &System) -> Result<()> {
    for trace in system.request_traces() {
        if let Some(endpoint_id) = &trace.external_endpoint_id {
            match system.get_endpoint(endpoint_id) {
                Ok(endpoint) if endpoint.is_external() => {}
                Ok(_) => {
                    return Err(ModelError::TraceEndpointNotExternal {
                        request_trace_id: trace.id.clone(),
                        endpoint_id: endpoint_id.clone(),
                    })
                }
                Err(_) => {
                    return Err(ModelError::DanglingTraceEndpoint {
                        request_trace_id: trace.id.clone(),
                        endpoint_id: endpoint_id.clone(),
                    })
                }
            }
        }
        for link_id in &trace.link_ids {
            if system.get_link(link_id).is_err() {
                return Err(ModelError::DanglingTraceLink {
                    request_trace_id: trace.id.clone(),
                    link_id: link_id.clone(),
                });
            }
        }
    }
    Ok(())
}
