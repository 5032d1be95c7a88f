use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by the entity graph
///
/// Lookup variants are returned by `System` accessors; the remaining
/// variants are referential-integrity violations found by
/// [`validate_system`](crate::validate::validate_system). Every variant
/// carries the ids needed to locate the offending entity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    // ===== Lookup Errors =====
    /// DataAggregate not found in the system
    #[error("DataAggregate not found: {data_aggregate_id}")]
    DataAggregateNotFound { data_aggregate_id: String },

    /// BackingData not found in the system
    #[error("BackingData not found: {backing_data_id}")]
    BackingDataNotFound { backing_data_id: String },

    /// Infrastructure not found in the system
    #[error("Infrastructure not found: {infrastructure_id}")]
    InfrastructureNotFound { infrastructure_id: String },

    /// Component not found in the system
    #[error("Component not found: {component_id}")]
    ComponentNotFound { component_id: String },

    /// Endpoint not found in the system
    #[error("Endpoint not found: {endpoint_id}")]
    EndpointNotFound { endpoint_id: String },

    /// DeploymentMapping not found in the system
    #[error("DeploymentMapping not found: {deployment_mapping_id}")]
    DeploymentMappingNotFound { deployment_mapping_id: String },

    /// Link not found in the system
    #[error("Link not found: {link_id}")]
    LinkNotFound { link_id: String },

    /// RequestTrace not found in the system
    #[error("RequestTrace not found: {request_trace_id}")]
    RequestTraceNotFound { request_trace_id: String },

    // ===== Reference Integrity Errors =====
    /// A Component or Infrastructure references a data entity that is absent
    #[error("Entity {owner_id} references missing data entity {data_id}")]
    DanglingDataUse { owner_id: String, data_id: String },

    /// A Component lists an Endpoint id with no matching Endpoint
    #[error("Component {component_id} owns missing endpoint {endpoint_id}")]
    DanglingEndpointOwnership {
        component_id: String,
        endpoint_id: String,
    },

    /// A Link's source Component is absent
    #[error("Link {link_id} has missing source component {source_id}")]
    DanglingLinkSource { link_id: String, source_id: String },

    /// A Link's target Endpoint is absent
    #[error("Link {link_id} has missing target endpoint {target_endpoint_id}")]
    DanglingLinkTarget {
        link_id: String,
        target_endpoint_id: String,
    },

    /// A DeploymentMapping's deployed entity is neither a Component nor an
    /// Infrastructure of the system
    #[error("DeploymentMapping {deployment_mapping_id} deploys missing entity {deployed_id}")]
    DeployedEntityNotFound {
        deployment_mapping_id: String,
        deployed_id: String,
    },

    /// A DeploymentMapping's underlying Infrastructure is absent
    #[error("DeploymentMapping {deployment_mapping_id} targets missing infrastructure {infrastructure_id}")]
    DeploymentHostNotFound {
        deployment_mapping_id: String,
        infrastructure_id: String,
    },

    /// An Infrastructure's hosted_by reference is absent
    #[error("Infrastructure {infrastructure_id} is hosted by missing infrastructure {hosted_by_id}")]
    DanglingHostedBy {
        infrastructure_id: String,
        hosted_by_id: String,
    },

    /// A RequestTrace references an absent ExternalEndpoint
    #[error("RequestTrace {request_trace_id} refers to missing endpoint {endpoint_id}")]
    DanglingTraceEndpoint {
        request_trace_id: String,
        endpoint_id: String,
    },

    /// A RequestTrace's entry endpoint is not externally reachable
    #[error("RequestTrace {request_trace_id} refers to endpoint {endpoint_id}, which is not external")]
    TraceEndpointNotExternal {
        request_trace_id: String,
        endpoint_id: String,
    },

    /// A RequestTrace lists an absent Link
    #[error("RequestTrace {request_trace_id} involves missing link {link_id}")]
    DanglingTraceLink {
        request_trace_id: String,
        link_id: String,
    },

    // ===== Ownership Errors =====
    /// An Endpoint is claimed by more than one Component
    #[error("Endpoint {endpoint_id} is owned by both component {first_component_id} and component {second_component_id}")]
    EndpointSharedByComponents {
        endpoint_id: String,
        first_component_id: String,
        second_component_id: String,
    },

    /// An Endpoint exists in the system but no Component owns it
    #[error("Endpoint {endpoint_id} is not owned by any component")]
    EndpointUnowned { endpoint_id: String },
}
