use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// What a single probe checks. Each kind owns an independent cache namespace,
/// so a host can be reachable while a service port on it is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Reachability,
    ServicePort(u16),
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Reachability => write!(f, "reachability"),
            ProbeKind::ServicePort(port) => write!(f, "tcp/{}", port),
        }
    }
}

/// Capability a caller is interested in for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Reachability,
    RemoteDesktop,
    Shell,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Reachability,
        Capability::RemoteDesktop,
        Capability::Shell,
    ];

    pub const SERVICES: [Capability; 2] = [Capability::RemoteDesktop, Capability::Shell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Reachability => "reachability",
            Capability::RemoteDesktop => "remote_desktop",
            Capability::Shell => "shell",
        }
    }

    pub fn is_service(&self) -> bool {
        !matches!(self, Capability::Reachability)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an endpoint address. Empty, whitespace-only or non-literal input
/// (hostnames included) yields `None` and must never be probed.
pub fn parse_address(address: &str) -> Option<IpAddr> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<IpAddr>().ok()
}
