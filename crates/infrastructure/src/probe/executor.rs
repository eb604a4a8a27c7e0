use super::icmp::IcmpEcho;
use super::reachability::{FallbackReachability, ReachabilityCheck};
use super::system_ping::SystemPing;
use super::tcp::TcpPortProbe;
use async_trait::async_trait;
use hostpulse_application::ports::ProbeExecutor;
use hostpulse_domain::config::ProbeConfig;
use hostpulse_domain::{parse_address, DomainError, ProbeKind};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Live network probes behind the `ProbeExecutor` port.
pub struct NetworkProbeExecutor {
    reachability: Arc<dyn ReachabilityCheck>,
    reachability_timeout: Duration,
    tcp: TcpPortProbe,
}

impl NetworkProbeExecutor {
    pub fn new(
        reachability: Arc<dyn ReachabilityCheck>,
        reachability_timeout: Duration,
        tcp: TcpPortProbe,
    ) -> Self {
        Self {
            reachability,
            reachability_timeout,
            tcp,
        }
    }

    /// ICMP echo first, then the system `ping` unless disabled.
    pub fn from_config(config: &ProbeConfig) -> Self {
        let mut chain = FallbackReachability::new(Arc::new(IcmpEcho::new()));
        if config.system_ping_fallback {
            chain = chain.with_fallback(Arc::new(SystemPing::new()));
        }

        Self::new(
            Arc::new(chain),
            config.reachability_timeout(),
            TcpPortProbe::new(config.port_timeout()),
        )
    }

    /// Reachability of a textual address. Anything that is not an IP
    /// literal is `false` without touching the network.
    pub async fn reachability_probe(&self, address: &str) -> bool {
        match parse_address(address) {
            Some(ip) => self.reach(ip).await,
            None => false,
        }
    }

    /// TCP listener check on a textual address. Same validation as
    /// `reachability_probe`.
    pub async fn port_probe(&self, address: &str, port: u16) -> bool {
        match parse_address(address) {
            Some(ip) => self.tcp.check(ip, port).await,
            None => false,
        }
    }

    async fn reach(&self, ip: IpAddr) -> bool {
        match self.reachability.check(ip, self.reachability_timeout).await {
            Ok(reachable) => reachable,
            Err(e) => {
                warn!(
                    address = %ip,
                    check = self.reachability.name(),
                    error = %e,
                    "Reachability check unavailable"
                );
                false
            }
        }
    }
}

#[async_trait]
impl ProbeExecutor for NetworkProbeExecutor {
    async fn probe(&self, address: IpAddr, kind: ProbeKind) -> Result<bool, DomainError> {
        match kind {
            ProbeKind::Reachability => Ok(self.reach(address).await),
            ProbeKind::ServicePort(port) => Ok(self.tcp.check(address, port).await),
        }
    }
}
