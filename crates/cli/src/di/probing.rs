use hostpulse_application::ports::RosterSource;
use hostpulse_application::services::ResultCache;
use hostpulse_application::use_cases::{RefreshBatchUseCase, RefreshRosterUseCase};
use hostpulse_domain::{Config, PortRoutingPolicy};
use hostpulse_infrastructure::probe::NetworkProbeExecutor;
use hostpulse_infrastructure::roster::{FileRosterSource, StaticRosterSource};
use std::sync::Arc;
use tracing::info;

pub struct ProbeServices {
    pub cache: Arc<ResultCache>,
    pub refresh: Arc<RefreshRosterUseCase>,
    pub roster_source: Arc<dyn RosterSource>,
}

impl ProbeServices {
    pub fn new(config: &Config) -> Self {
        info!(
            cache_ttl_secs = config.probe.cache_ttl_secs,
            max_concurrent_probes = config.probe.max_concurrent_probes,
            system_ping_fallback = config.probe.system_ping_fallback,
            "Initializing probe services"
        );

        let executor = Arc::new(NetworkProbeExecutor::from_config(&config.probe));
        let cache = Arc::new(ResultCache::new(config.probe.cache_ttl()));
        let dispatcher = Arc::new(
            RefreshBatchUseCase::new(executor, cache.clone())
                .with_concurrency_limit(config.probe.concurrency_limit()),
        );
        let routing = Arc::new(PortRoutingPolicy::from_config(&config.ports));

        Self {
            cache,
            refresh: Arc::new(RefreshRosterUseCase::new(dispatcher, routing)),
            roster_source: Self::roster_source(config),
        }
    }

    fn roster_source(config: &Config) -> Arc<dyn RosterSource> {
        match &config.roster.path {
            Some(path) => {
                info!(path = %path, "Using roster file");
                Arc::new(FileRosterSource::new(path))
            }
            None => {
                info!(
                    endpoints = config.roster.endpoints.len(),
                    "Using roster from configuration"
                );
                Arc::new(StaticRosterSource::new(config.roster.endpoints.clone()))
            }
        }
    }
}
