//! hostpulse domain layer
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod port_routing;
pub mod probe;
pub mod status;

pub use config::{CliOverrides, Config, ConfigError};
pub use endpoint::{Endpoint, RosterChange};
pub use errors::DomainError;
pub use port_routing::PortRoutingPolicy;
pub use probe::{parse_address, Capability, ProbeKind};
pub use status::CapabilitySnapshot;
