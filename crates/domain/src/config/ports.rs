use crate::port_routing::{DEFAULT_REMOTE_DESKTOP_PORT, DEFAULT_SHELL_PORT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortsConfig {
    #[serde(default = "default_remote_desktop")]
    pub remote_desktop: u16,

    #[serde(default = "default_shell")]
    pub shell: u16,

    /// Address literal -> port.
    #[serde(default)]
    pub remote_desktop_overrides: BTreeMap<String, u16>,

    #[serde(default = "default_shell_overrides")]
    pub shell_overrides: BTreeMap<String, u16>,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            remote_desktop: default_remote_desktop(),
            shell: default_shell(),
            remote_desktop_overrides: BTreeMap::new(),
            shell_overrides: default_shell_overrides(),
        }
    }
}

fn default_remote_desktop() -> u16 {
    DEFAULT_REMOTE_DESKTOP_PORT
}

fn default_shell() -> u16 {
    DEFAULT_SHELL_PORT
}

fn default_shell_overrides() -> BTreeMap<String, u16> {
    [
        ("192.168.3.220", 22),
        ("192.168.3.143", 22),
        ("192.168.3.235", 22),
        ("192.168.3.53", 16166),
    ]
    .into_iter()
    .map(|(addr, port)| (addr.to_string(), port))
    .collect()
}
