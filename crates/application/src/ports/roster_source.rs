use async_trait::async_trait;
use hostpulse_domain::{DomainError, Endpoint};

/// Supplies the current ordered endpoint roster.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn load_roster(&self) -> Result<Vec<Endpoint>, DomainError>;
}
