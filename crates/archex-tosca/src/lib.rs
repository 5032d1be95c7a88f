//! archex-tosca - Service template conversion for archex Systems
//!
//! Provides:
//! - Export of an entity graph into a TOSCA-style service template
//! - Import of a service template back into an entity graph
//! - Key derivation: identifier sanitizing, uniqueness, key-id mapping
//!
//! Both directions run as fixed pass sequences over the document's node
//! and relationship entries; see [`export`] and [`import`].

pub mod errors;
pub mod export;
pub mod import;
pub mod key_id_map;
pub mod sanitize;
pub mod template;
pub mod unique_keys;

// Re-export the conversion entry points and their error type
pub use errors::{Result, ToscaError};
pub use export::export_system;
pub use import::{import_document, import_template};
pub use template::ServiceTemplate;
