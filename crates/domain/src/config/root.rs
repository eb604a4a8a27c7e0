use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::ports::PortsConfig;
use super::probe::ProbeConfig;
use super::roster::RosterConfig;
use super::schedule::ScheduleConfig;
use crate::probe::parse_address;

const LOCAL_CONFIG_PATH: &str = "hostpulse.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/hostpulse/config.toml";

/// Main configuration structure for hostpulse
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Probe timeouts, cache TTL and fan-out limits
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Refresh cadence
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Service port routing
    #[serde(default)]
    pub ports: PortsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Endpoint roster
    #[serde(default)]
    pub roster: RosterConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hostpulse.toml in current directory
    /// 3. /etc/hostpulse/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.roster_path {
            self.roster.path = Some(path);
        }
        if let Some(secs) = overrides.reachability_interval_secs {
            self.schedule.reachability_interval_secs = secs;
        }
        if let Some(secs) = overrides.cache_ttl_secs {
            self.probe.cache_ttl_secs = secs;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("probe.cache_ttl_secs", self.probe.cache_ttl_secs),
            ("probe.reachability_timeout_ms", self.probe.reachability_timeout_ms),
            ("probe.port_timeout_ms", self.probe.port_timeout_ms),
            (
                "schedule.reachability_interval_secs",
                self.schedule.reachability_interval_secs,
            ),
            (
                "schedule.roster_poll_interval_secs",
                self.schedule.roster_poll_interval_secs,
            ),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{} must be > 0", name)));
            }
        }

        if self.ports.remote_desktop == 0 || self.ports.shell == 0 {
            return Err(ConfigError::Validation(
                "Default service ports cannot be 0".to_string(),
            ));
        }

        let overrides = self
            .ports
            .remote_desktop_overrides
            .iter()
            .chain(self.ports.shell_overrides.iter());
        for (address, port) in overrides {
            if parse_address(address).is_none() {
                return Err(ConfigError::Validation(format!(
                    "Port override key '{}' is not an IP address",
                    address
                )));
            }
            if *port == 0 {
                return Err(ConfigError::Validation(format!(
                    "Port override for '{}' cannot be 0",
                    address
                )));
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub roster_path: Option<String>,
    pub reachability_interval_secs: Option<u64>,
    pub cache_ttl_secs: Option<u64>,
    pub log_level: Option<String>,
}
