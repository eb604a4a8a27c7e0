use clap::Parser;
use hostpulse_application::ports::RosterSource;
use hostpulse_domain::{Capability, CliOverrides};
use hostpulse_jobs::{
    JobRunner, ProbeSchedulerJob, RosterChangeNotifier, RosterHandle, RosterWatchJob, StatusBoard,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod report;

#[derive(Parser)]
#[command(name = "hostpulse")]
#[command(version)]
#[command(about = "hostpulse - Reachability and service availability monitor for a host roster")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Roster file path (TOML with [[endpoints]])
    #[arg(short = 'r', long, value_name = "FILE")]
    roster: Option<String>,

    /// Reachability refresh interval in seconds
    #[arg(short = 'i', long, value_name = "SECS")]
    interval: Option<u64>,

    /// Probe result cache TTL in seconds
    #[arg(long, value_name = "SECS")]
    cache_ttl: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Probe every capability once, print a JSON report and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        roster_path: cli.roster.clone(),
        reachability_interval_secs: cli.interval,
        cache_ttl_secs: cli.cache_ttl,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting hostpulse v{}", env!("CARGO_PKG_VERSION"));

    let services = di::ProbeServices::new(&config);
    let endpoints = services.roster_source.load_roster().await?;
    info!(endpoints = endpoints.len(), "Roster loaded");

    if cli.once {
        let report = report::collect(&services.refresh, &endpoints).await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let roster = RosterHandle::new(endpoints);
    let notifier = RosterChangeNotifier::new();
    let board = Arc::new(StatusBoard::new());

    for capability in Capability::ALL {
        spawn_status_logger(&board, capability, shutdown.clone());
    }

    let scheduler = ProbeSchedulerJob::new(
        services.refresh.clone(),
        roster.clone(),
        board.clone(),
        notifier.clone(),
    )
    .with_interval(Duration::from_secs(
        config.schedule.reachability_interval_secs,
    ));

    let roster_watch = RosterWatchJob::new(services.roster_source.clone(), roster, notifier)
        .with_interval(Duration::from_secs(config.schedule.roster_poll_interval_secs));

    JobRunner::new()
        .with_probe_scheduler(scheduler)
        .with_roster_watch(roster_watch)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }

    info!("Shutdown requested");
    shutdown.cancel();

    info!(cached_results = services.cache.len(), "hostpulse stopped");
    Ok(())
}

fn spawn_status_logger(board: &StatusBoard, capability: Capability, shutdown: CancellationToken) {
    let mut updates = board.subscribe(capability);
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    let down: Vec<&str> = snapshot
                        .results
                        .iter()
                        .filter(|(_, up)| !up)
                        .map(|(name, _)| name.as_str())
                        .collect();
                    info!(
                        capability = %capability,
                        endpoints = snapshot.results.len(),
                        up = snapshot.up_count(),
                        down = ?down,
                        "Status updated"
                    );
                }
            }
        }
    });
}
