use crate::config::PortsConfig;
use crate::probe::{parse_address, Capability, ProbeKind};
use std::collections::HashMap;
use std::net::IpAddr;

pub const DEFAULT_REMOTE_DESKTOP_PORT: u16 = 3389;
pub const DEFAULT_SHELL_PORT: u16 = 49151;

/// Maps a capability and an address to the TCP port that should be probed.
///
/// Defaults apply per capability; a static override table covers hosts whose
/// service listens on a non-standard port.
#[derive(Debug, Clone)]
pub struct PortRoutingPolicy {
    remote_desktop: u16,
    shell: u16,
    remote_desktop_overrides: HashMap<IpAddr, u16>,
    shell_overrides: HashMap<IpAddr, u16>,
}

impl PortRoutingPolicy {
    pub fn new(remote_desktop: u16, shell: u16) -> Self {
        Self {
            remote_desktop,
            shell,
            remote_desktop_overrides: HashMap::new(),
            shell_overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, capability: Capability, address: IpAddr, port: u16) -> Self {
        match capability {
            Capability::RemoteDesktop => {
                self.remote_desktop_overrides.insert(address, port);
            }
            Capability::Shell => {
                self.shell_overrides.insert(address, port);
            }
            Capability::Reachability => {}
        }
        self
    }

    /// Builds the policy from `[ports]`. Override keys were checked by
    /// `Config::validate`; unparsable keys are skipped here.
    pub fn from_config(config: &PortsConfig) -> Self {
        let mut policy = Self::new(config.remote_desktop, config.shell);
        for (address, port) in &config.remote_desktop_overrides {
            if let Some(ip) = parse_address(address) {
                policy = policy.with_override(Capability::RemoteDesktop, ip, *port);
            }
        }
        for (address, port) in &config.shell_overrides {
            if let Some(ip) = parse_address(address) {
                policy = policy.with_override(Capability::Shell, ip, *port);
            }
        }
        policy
    }

    /// `None` for `Reachability`, which has no port.
    pub fn port_for(&self, capability: Capability, address: Option<IpAddr>) -> Option<u16> {
        let (default, overrides) = match capability {
            Capability::Reachability => return None,
            Capability::RemoteDesktop => (self.remote_desktop, &self.remote_desktop_overrides),
            Capability::Shell => (self.shell, &self.shell_overrides),
        };

        Some(
            address
                .and_then(|ip| overrides.get(&ip).copied())
                .unwrap_or(default),
        )
    }

    pub fn kind_for(&self, capability: Capability, address: Option<IpAddr>) -> ProbeKind {
        match self.port_for(capability, address) {
            Some(port) => ProbeKind::ServicePort(port),
            None => ProbeKind::Reachability,
        }
    }
}

impl Default for PortRoutingPolicy {
    fn default() -> Self {
        Self::from_config(&PortsConfig::default())
    }
}
