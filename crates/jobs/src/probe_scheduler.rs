use crate::roster::{RosterChangeNotifier, RosterHandle};
use crate::status_board::StatusBoard;
use hostpulse_application::use_cases::RefreshRosterUseCase;
use hostpulse_domain::{Capability, CapabilitySnapshot, DomainError, RosterChange};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const DEFAULT_REACHABILITY_INTERVAL_SECS: u64 = 10;

enum Signal {
    Refresh,
    Ignore,
    Closed,
}

fn classify(received: Result<RosterChange, RecvError>) -> Signal {
    match received {
        Ok(change) if change.membership_changed => Signal::Refresh,
        Ok(_) => {
            debug!("Roster reordered, keeping current results");
            Signal::Ignore
        }
        Err(RecvError::Lagged(skipped)) => {
            warn!(skipped, "Missed roster signals, refreshing");
            Signal::Refresh
        }
        Err(RecvError::Closed) => Signal::Closed,
    }
}

/// Keeps the status board current.
///
/// The reachability stream runs on a self-rescheduling tick and on membership
/// changes. The service stream runs once at startup and then only on
/// membership changes. Each stream joins its batch before deciding anything
/// else.
pub struct ProbeSchedulerJob {
    refresh: Arc<RefreshRosterUseCase>,
    roster: RosterHandle,
    board: Arc<StatusBoard>,
    notifier: RosterChangeNotifier,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ProbeSchedulerJob {
    pub fn new(
        refresh: Arc<RefreshRosterUseCase>,
        roster: RosterHandle,
        board: Arc<StatusBoard>,
        notifier: RosterChangeNotifier,
    ) -> Self {
        Self {
            refresh,
            roster,
            board,
            notifier,
            interval: Duration::from_secs(DEFAULT_REACHABILITY_INTERVAL_SECS),
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

    pub fn board(&self) -> &Arc<StatusBoard> {
        &self.board
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Starting probe scheduler"
        );

        // Subscribe before spawning so no signal sent after `start` returns
        // can be missed.
        let reachability_signals = self.notifier.subscribe();
        let service_signals = self.notifier.subscribe();

        let reachability_job = Arc::clone(&self);
        tokio::spawn(async move {
            reachability_job
                .run_reachability_stream(reachability_signals)
                .await;
        });

        let service_job = Arc::clone(&self);
        tokio::spawn(async move {
            service_job.run_service_stream(service_signals).await;
        });
    }

    async fn run_reachability_stream(&self, mut signals: Receiver<RosterChange>) {
        let mut signals_open = true;
        let mut next_tick = Instant::now();

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = sleep_until(next_tick) => {}
                received = signals.recv(), if signals_open => match classify(received) {
                    Signal::Refresh => {}
                    Signal::Ignore => continue,
                    Signal::Closed => {
                        debug!("Roster signals closed, reachability stays on its tick");
                        signals_open = false;
                        continue;
                    }
                },
            }

            if !self.refresh_capability(Capability::Reachability).await {
                break;
            }
            next_tick = Instant::now() + self.interval;
        }

        info!("ProbeSchedulerJob (reachability): shutting down");
    }

    async fn run_service_stream(&self, mut signals: Receiver<RosterChange>) {
        if self.refresh_services().await {
            loop {
                tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => break,
                    received = signals.recv() => match classify(received) {
                        Signal::Refresh => {
                            if !self.refresh_services().await {
                                break;
                            }
                        }
                        Signal::Ignore => {}
                        Signal::Closed => {
                            debug!("Roster signals closed, service stream idle");
                            self.shutdown.cancelled().await;
                            break;
                        }
                    },
                }
            }
        }

        info!("ProbeSchedulerJob (services): shutting down");
    }

    /// Both service batches run side by side and are joined together.
    async fn refresh_services(&self) -> bool {
        let (remote_desktop, shell) = tokio::join!(
            self.refresh_capability(Capability::RemoteDesktop),
            self.refresh_capability(Capability::Shell),
        );
        remote_desktop && shell
    }

    /// Runs one batch and publishes it. Returns `false` once shutdown fired.
    async fn refresh_capability(&self, capability: Capability) -> bool {
        let roster = self.roster.snapshot().await;

        match self
            .refresh
            .execute_until(capability, &roster, &self.shutdown)
            .await
        {
            Ok(outcome) => {
                let snapshot = CapabilitySnapshot::new(capability, outcome.into_results());
                debug!(
                    capability = %capability,
                    endpoints = snapshot.results.len(),
                    up = snapshot.up_count(),
                    "Publishing capability snapshot"
                );
                self.board.publish(snapshot);
                true
            }
            Err(DomainError::Cancelled) => false,
            Err(e) => {
                error!(capability = %capability, error = %e, "Capability refresh failed");
                true
            }
        }
    }
}
