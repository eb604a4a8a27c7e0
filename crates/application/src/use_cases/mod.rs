pub mod probing;

pub use probing::{
    BatchOutcome, ProbeOutcome, ProbeRequest, RefreshBatchUseCase, RefreshRosterUseCase,
    ResultSource,
};
