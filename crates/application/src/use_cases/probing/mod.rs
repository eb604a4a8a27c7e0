pub mod batch;
pub mod refresh_batch;
pub mod refresh_roster;

pub use batch::{BatchOutcome, ProbeOutcome, ProbeRequest, ResultSource};
pub use refresh_batch::RefreshBatchUseCase;
pub use refresh_roster::RefreshRosterUseCase;
