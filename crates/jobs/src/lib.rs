pub mod probe_scheduler;
pub mod roster;
pub mod roster_watch;
pub mod runner;
pub mod status_board;

pub use probe_scheduler::ProbeSchedulerJob;
pub use roster::{RosterChangeNotifier, RosterHandle};
pub use roster_watch::RosterWatchJob;
pub use runner::JobRunner;
pub use status_board::StatusBoard;
