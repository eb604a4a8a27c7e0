use async_trait::async_trait;
use hostpulse_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One way of answering "does this host reply to a liveness probe".
///
/// `Ok(false)` means the host did not answer in time. `Err` means the check
/// itself could not run and another strategy may be tried.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self, address: IpAddr, timeout: Duration) -> Result<bool, DomainError>;
}

/// Tries the primary check, then the fallback on error, then gives up.
///
/// With a fallback configured, every failure collapses to `Ok(false)`.
/// Without one, the primary error propagates.
pub struct FallbackReachability {
    primary: Arc<dyn ReachabilityCheck>,
    fallback: Option<Arc<dyn ReachabilityCheck>>,
}

impl FallbackReachability {
    pub fn new(primary: Arc<dyn ReachabilityCheck>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ReachabilityCheck>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

#[async_trait]
impl ReachabilityCheck for FallbackReachability {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn check(&self, address: IpAddr, timeout: Duration) -> Result<bool, DomainError> {
        let primary_err = match self.primary.check(address, timeout).await {
            Ok(reachable) => return Ok(reachable),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(primary_err);
        };

        debug!(
            address = %address,
            primary = self.primary.name(),
            fallback = fallback.name(),
            error = %primary_err,
            "Primary reachability check failed, trying fallback"
        );

        match fallback.check(address, timeout).await {
            Ok(reachable) => Ok(reachable),
            Err(e) => {
                debug!(address = %address, error = %e, "Fallback reachability check failed");
                Ok(false)
            }
        }
    }
}
