use async_trait::async_trait;
use hostpulse_domain::{DomainError, ProbeKind};
use std::net::IpAddr;

/// Port for live network probes.
///
/// Implementations own their timeouts and collapse transient failures into
/// `Ok(false)`. `Err` is reserved for the case where no probe primitive can be
/// built at all; batch callers still treat it as `false` for that entry.
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    async fn probe(&self, address: IpAddr, kind: ProbeKind) -> Result<bool, DomainError>;
}
