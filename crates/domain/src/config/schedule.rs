use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_reachability_interval")]
    pub reachability_interval_secs: u64,

    #[serde(default = "default_roster_poll_interval")]
    pub roster_poll_interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            reachability_interval_secs: default_reachability_interval(),
            roster_poll_interval_secs: default_roster_poll_interval(),
        }
    }
}

fn default_reachability_interval() -> u64 {
    10
}

fn default_roster_poll_interval() -> u64 {
    15
}
