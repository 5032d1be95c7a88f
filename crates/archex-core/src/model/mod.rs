pub mod backing_data;
pub mod component;
pub mod data_aggregate;
pub mod data_use;
pub mod deployment_mapping;
pub mod endpoint;
pub mod infrastructure;
pub mod link;
pub mod metadata;
pub mod properties;
pub mod request_trace;

pub use backing_data::{BackingData, IncludedData};
pub use component::{Component, ComponentKind};
pub use data_aggregate::DataAggregate;
pub use data_use::DataUse;
pub use deployment_mapping::DeploymentMapping;
pub use endpoint::{Endpoint, EndpointKind};
pub use infrastructure::Infrastructure;
pub use link::Link;
pub use metadata::Metadata;
pub use properties::PropertyBag;
pub use request_trace::RequestTrace;
