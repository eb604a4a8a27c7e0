mod probe_executor;
mod roster_source;

pub use probe_executor::ProbeExecutor;
pub use roster_source::RosterSource;
