use crate::roster::{RosterChangeNotifier, RosterHandle};
use hostpulse_application::ports::RosterSource;
use hostpulse_domain::{DomainError, RosterChange};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Polls the roster source and turns edits into change signals.
pub struct RosterWatchJob {
    source: Arc<dyn RosterSource>,
    roster: RosterHandle,
    notifier: RosterChangeNotifier,
    interval: Duration,
    shutdown: CancellationToken,
}

impl RosterWatchJob {
    pub fn new(
        source: Arc<dyn RosterSource>,
        roster: RosterHandle,
        notifier: RosterChangeNotifier,
    ) -> Self {
        Self {
            source,
            roster,
            notifier,
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// One poll. An unchanged roster sends nothing.
    pub async fn poll_once(&self) -> Result<Option<RosterChange>, DomainError> {
        let endpoints = self.source.load_roster().await?;
        let count = endpoints.len();

        let change = self.roster.replace(endpoints).await;
        if let Some(change) = change {
            info!(
                endpoints = count,
                membership_changed = change.membership_changed,
                "Roster changed"
            );
            self.notifier.notify(change);
        }
        Ok(change)
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting roster watch job"
        );

        let mut interval = tokio::time::interval(self.interval);
        // The roster was loaded during startup.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("RosterWatchJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.poll_once().await {
                        error!(error = %e, "Roster poll failed, keeping previous roster");
                    }
                }
            }
        }
    }
}
