pub mod errors;
pub mod logging;
pub mod ports;
pub mod probe;
pub mod root;
pub mod roster;
pub mod schedule;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use ports::PortsConfig;
pub use probe::ProbeConfig;
pub use root::{CliOverrides, Config};
pub use roster::RosterConfig;
pub use schedule::ScheduleConfig;
