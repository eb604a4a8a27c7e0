use crate::{ProbeSchedulerJob, RosterWatchJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(ProbeSchedulerJob);
impl_spawnable_job!(RosterWatchJob);

fn spawn_job<J: SpawnableJob>(job: Option<J>, shutdown: &Option<CancellationToken>) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job();
    }
}

pub struct JobRunner {
    probe_scheduler: Option<ProbeSchedulerJob>,
    roster_watch: Option<RosterWatchJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            probe_scheduler: None,
            roster_watch: None,
            shutdown: None,
        }
    }

    pub fn with_probe_scheduler(mut self, job: ProbeSchedulerJob) -> Self {
        self.probe_scheduler = Some(job);
        self
    }

    pub fn with_roster_watch(mut self, job: RosterWatchJob) -> Self {
        self.roster_watch = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        // The scheduler subscribes to roster signals inside `start`, so it
        // goes first.
        spawn_job(self.probe_scheduler, &self.shutdown);
        spawn_job(self.roster_watch, &self.shutdown);

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
