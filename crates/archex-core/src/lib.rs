//! Archex Core - the in-memory architecture model
//!
//! This crate provides the entity graph an architecture model is made of,
//! including:
//! - Typed entity models (components, data, infrastructure, endpoints,
//!   deployment mappings, links, request traces)
//! - The System aggregate with id-keyed, deterministically ordered
//!   collections
//! - Referential-integrity validation over a whole System
//! - Fresh entity-id generation
//! - Logging initialization shared by the workspace binaries
//!
//! The TOSCA converter in `archex-tosca` consumes a System as a read-only
//! snapshot on export and produces a brand-new one on import.

pub mod errors;
pub mod ids;
pub mod logging;
pub mod model;
pub mod system;
pub mod validate;

// Re-export commonly used types
pub use errors::{ModelError, Result};
pub use model::{
    BackingData, Component, ComponentKind, DataAggregate, DataUse, DeploymentMapping, Endpoint,
    EndpointKind, IncludedData, Infrastructure, Link, Metadata, PropertyBag, RequestTrace,
};
pub use system::System;
pub use validate::validate_system;
