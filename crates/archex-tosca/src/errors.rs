//! Error handling for the TOSCA converter
//!
//! One taxonomy for both pipelines. Export variants signal a broken
//! invariant in the in-memory graph (programming errors, fatal); import
//! variants describe malformed external documents and carry the offending
//! identifier, requirement kind and pass so the caller can locate the bad
//! fragment.

use thiserror::Error;

/// Result type alias using ToscaError
pub type Result<T> = std::result::Result<T, ToscaError>;

/// Errors raised while converting between a System and a service template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToscaError {
    // ===== Document Errors =====
    /// The document text is not parseable YAML or violates the schema
    #[error("Failed to parse service template: {message}")]
    Yaml { message: String },

    /// The document has no topology template to import from
    #[error("Service template has no topology_template section")]
    MissingTopology,

    // ===== Key Registration Errors =====
    /// A document key was registered twice in one conversion run
    #[error("Key '{key}' is already registered")]
    DuplicateKey { key: String },

    /// An entity id was registered twice in one conversion run
    #[error("Id '{id}' is already registered under key '{key}'")]
    DuplicateId { key: String, id: String },

    /// No entity id was ever registered for this key
    #[error("No entity registered for key '{key}'")]
    UnknownKey { key: String },

    /// No key was ever registered for this entity id
    #[error("No key registered for entity id '{id}'")]
    UnknownId { id: String },

    // ===== Requirement Errors =====
    /// A requirement points at a key no processed node or relationship has
    #[error("Requirement '{requirement}' on node '{node_key}' references unknown key '{target}' (import pass {pass})")]
    UnresolvedRequirement {
        node_key: String,
        requirement: String,
        target: String,
        pass: u8,
    },

    /// A requirement uses the bare-identifier shorthand where only the
    /// structured form is defined
    #[error("Requirement '{requirement}' on node '{node_key}' uses the short form; only the extended form is supported")]
    UnsupportedShortForm {
        node_key: String,
        requirement: String,
    },

    /// A structured requirement lacks a field the converter needs
    #[error("Requirement '{requirement}' on node '{node_key}' is missing field '{field}'")]
    MissingRequirementField {
        node_key: String,
        requirement: String,
        field: String,
    },

    /// A requirement or trace property resolved to an entity of the wrong kind
    #[error("Reference '{reference}' on node '{node_key}' targets '{target}', which is not {expected}")]
    WrongTargetKind {
        node_key: String,
        reference: String,
        target: String,
        expected: &'static str,
    },

    /// Two nodes claim the same endpoint node
    #[error("Endpoint node '{endpoint_key}' is provided by both '{first_node_key}' and '{second_node_key}'")]
    EndpointClaimedTwice {
        endpoint_key: String,
        first_node_key: String,
        second_node_key: String,
    },

    // ===== Relationship Errors =====
    /// A structured requirement names a relationship entry the document
    /// does not define
    #[error("Requirement '{requirement}' on node '{node_key}' names unknown relationship '{relationship_key}'")]
    UnknownRelationship {
        node_key: String,
        requirement: String,
        relationship_key: String,
    },

    /// A relationship entry with properties was never referenced by any
    /// requirement, so there is no entity to back-fill
    #[error("Relationship '{relationship_key}' of type '{type_name}' is not referenced by any requirement (import pass 5)")]
    OrphanRelationship {
        relationship_key: String,
        type_name: String,
    },

    // ===== Trace Errors =====
    /// A request trace property references an unknown key
    #[error("RequestTrace node '{node_key}' references unknown key '{target}' in property '{property}' (import pass 6)")]
    UnresolvedTraceReference {
        node_key: String,
        property: String,
        target: String,
    },

    /// A structural trace property does not have the expected shape
    #[error("RequestTrace node '{node_key}' has a malformed '{property}' property")]
    InvalidTraceProperty { node_key: String, property: String },

    // ===== Graph Errors =====
    /// The in-memory graph broke one of the exporter's invariants
    #[error("Internal converter error: {message}")]
    Internal { message: String },

    /// A System lookup failed while resolving document references
    #[error(transparent)]
    Model(#[from] archex_core::ModelError),
}

/// Conversion from serde_yaml::Error to ToscaError
impl From<serde_yaml::Error> for ToscaError {
    fn from(err: serde_yaml::Error) -> Self {
        ToscaError::Yaml {
            message: err.to_string(),
        }
    }
}
