use hostpulse_domain::config::{LogFormat, ProbeConfig};
use hostpulse_domain::{Capability, CliOverrides, Config, ConfigError, PortRoutingPolicy};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.probe.cache_ttl_secs, 30);
    assert_eq!(config.probe.reachability_timeout_ms, 1000);
    assert_eq!(config.probe.port_timeout_ms, 3000);
    assert_eq!(config.probe.max_concurrent_probes, 0);
    assert!(config.probe.system_ping_fallback);
    assert_eq!(config.schedule.reachability_interval_secs, 10);
    assert_eq!(config.schedule.roster_poll_interval_secs, 15);
    assert_eq!(config.ports.remote_desktop, 3389);
    assert_eq!(config.ports.shell, 49151);
    assert_eq!(config.ports.shell_overrides.len(), 4);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert!(config.roster.path.is_none());
    assert!(config.roster.endpoints.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_probe_config_durations() {
    let probe = ProbeConfig::default();

    assert_eq!(probe.cache_ttl(), Duration::from_secs(30));
    assert_eq!(probe.reachability_timeout(), Duration::from_secs(1));
    assert_eq!(probe.port_timeout(), Duration::from_secs(3));
    assert_eq!(probe.concurrency_limit(), None);
}

#[test]
fn test_config_from_toml_partial_sections() {
    let config = Config::from_toml(
        r#"
[probe]
cache_ttl_secs = 5
max_concurrent_probes = 16

[ports]
shell = 2222

[ports.remote_desktop_overrides]
"10.0.0.7" = 3390

[logging]
format = "json"

[[roster.endpoints]]
name = "h1"
address = "10.0.0.1"

[[roster.endpoints]]
name = "h2"
address = ""
capabilities = ["reachability"]
"#,
    )
    .unwrap();

    assert_eq!(config.probe.cache_ttl_secs, 5);
    assert_eq!(config.probe.port_timeout_ms, 3000);
    assert_eq!(config.probe.concurrency_limit(), Some(16));
    assert_eq!(config.ports.shell, 2222);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.roster.endpoints.len(), 2);
    assert_eq!(config.roster.endpoints[0].capabilities.len(), 3);
    assert_eq!(
        config.roster.endpoints[1].capabilities,
        vec![Capability::Reachability]
    );

    let policy = PortRoutingPolicy::from_config(&config.ports);
    let ip = "10.0.0.7".parse().ok();
    assert_eq!(policy.port_for(Capability::RemoteDesktop, ip), Some(3390));
    assert_eq!(policy.port_for(Capability::Shell, ip), Some(2222));
}

#[test]
fn test_config_parse_error() {
    let result = Config::from_toml("[probe]\ncache_ttl_secs = \"thirty\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_ttl() {
    let mut config = Config::default();
    config.probe.cache_ttl_secs = 0;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("probe.cache_ttl_secs"));
}

#[test]
fn test_validate_rejects_bad_override_key() {
    let mut config = Config::default();
    config
        .ports
        .shell_overrides
        .insert("build-server".to_string(), 22);

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_applies_cli_overrides() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[schedule]\nreachability_interval_secs = 20\n")
        .unwrap();
    file.flush().unwrap();

    let config = Config::load(
        file.path().to_str(),
        CliOverrides {
            roster_path: Some("/tmp/roster.toml".to_string()),
            reachability_interval_secs: Some(5),
            cache_ttl_secs: Some(60),
            log_level: Some("debug".to_string()),
        },
    )
    .unwrap();

    assert_eq!(config.schedule.reachability_interval_secs, 5);
    assert_eq!(config.probe.cache_ttl_secs, 60);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.roster.path.as_deref(), Some("/tmp/roster.toml"));
}

#[test]
fn test_load_missing_file() {
    let result = Config::load(Some("/nonexistent/hostpulse.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_load_rejects_zero_interval_override() {
    let file = NamedTempFile::new().unwrap();
    let result = Config::load(
        file.path().to_str(),
        CliOverrides {
            reachability_interval_secs: Some(0),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
