use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Seconds a cached probe result stays valid.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_reachability_timeout_ms")]
    pub reachability_timeout_ms: u64,

    #[serde(default = "default_port_timeout_ms")]
    pub port_timeout_ms: u64,

    /// Upper bound on live probes running at once within a batch.
    /// 0 means one task per pending probe with no cap.
    #[serde(default)]
    pub max_concurrent_probes: usize,

    /// Shell out to the system `ping` when the ICMP socket cannot be used.
    #[serde(default = "default_true")]
    pub system_ping_fallback: bool,
}

impl ProbeConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn reachability_timeout(&self) -> Duration {
        Duration::from_millis(self.reachability_timeout_ms)
    }

    pub fn port_timeout(&self) -> Duration {
        Duration::from_millis(self.port_timeout_ms)
    }

    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.max_concurrent_probes > 0).then_some(self.max_concurrent_probes)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            reachability_timeout_ms: default_reachability_timeout_ms(),
            port_timeout_ms: default_port_timeout_ms(),
            max_concurrent_probes: 0,
            system_ping_fallback: true,
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    30
}

fn default_reachability_timeout_ms() -> u64 {
    1000
}

fn default_port_timeout_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}
