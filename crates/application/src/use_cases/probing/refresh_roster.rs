use super::batch::{BatchOutcome, ProbeRequest, ResultSource};
use super::refresh_batch::RefreshBatchUseCase;
use hostpulse_domain::{parse_address, Capability, DomainError, Endpoint, PortRoutingPolicy};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Builds the batch for one capability out of a roster and resolves it.
/// Tokens are endpoint names.
pub struct RefreshRosterUseCase {
    dispatcher: Arc<RefreshBatchUseCase>,
    routing: Arc<PortRoutingPolicy>,
}

impl RefreshRosterUseCase {
    pub fn new(dispatcher: Arc<RefreshBatchUseCase>, routing: Arc<PortRoutingPolicy>) -> Self {
        Self {
            dispatcher,
            routing,
        }
    }

    /// Endpoints that did not ask for `capability` are left out.
    pub fn build_requests(
        &self,
        capability: Capability,
        roster: &[Endpoint],
    ) -> Vec<ProbeRequest<String>> {
        roster
            .iter()
            .filter(|endpoint| endpoint.wants(capability))
            .map(|endpoint| {
                let kind = self
                    .routing
                    .kind_for(capability, parse_address(&endpoint.address));
                ProbeRequest::new(endpoint.name.clone(), endpoint.address.clone(), kind)
            })
            .collect()
    }

    pub async fn execute(&self, capability: Capability, roster: &[Endpoint]) -> BatchOutcome<String> {
        let requests = self.build_requests(capability, roster);
        let outcome = self.dispatcher.execute(requests).await;
        log_outcome(capability, &outcome);
        outcome
    }

    pub async fn execute_until(
        &self,
        capability: Capability,
        roster: &[Endpoint],
        cancel: &CancellationToken,
    ) -> Result<BatchOutcome<String>, DomainError> {
        let requests = self.build_requests(capability, roster);
        let outcome = self.dispatcher.execute_until(requests, cancel).await?;
        log_outcome(capability, &outcome);
        Ok(outcome)
    }
}

fn log_outcome(capability: Capability, outcome: &BatchOutcome<String>) {
    debug!(
        capability = %capability,
        endpoints = outcome.len(),
        up = outcome.up_count(),
        cached = outcome.count(ResultSource::Cache),
        invalid = outcome.count(ResultSource::InvalidAddress),
        probed = outcome.unique_probes(),
        "Capability refresh completed"
    );
}
