use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Probe unavailable: {0}")]
    ProbeUnavailable(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("Operation cancelled")]
    Cancelled,
}
