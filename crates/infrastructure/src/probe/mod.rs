pub mod executor;
pub mod icmp;
pub mod reachability;
pub mod system_ping;
pub mod tcp;

pub use executor::NetworkProbeExecutor;
pub use icmp::IcmpEcho;
pub use reachability::{FallbackReachability, ReachabilityCheck};
pub use system_ping::SystemPing;
pub use tcp::TcpPortProbe;
