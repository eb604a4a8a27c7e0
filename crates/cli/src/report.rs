use hostpulse_application::use_cases::RefreshRosterUseCase;
use hostpulse_domain::{Capability, CapabilitySnapshot, Endpoint};
use serde::Serialize;

/// Output of `--once`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub endpoints: usize,
    pub capabilities: Vec<CapabilitySnapshot>,
}

pub async fn collect(refresh: &RefreshRosterUseCase, roster: &[Endpoint]) -> StatusReport {
    let mut capabilities = Vec::with_capacity(Capability::ALL.len());
    for capability in Capability::ALL {
        let outcome = refresh.execute(capability, roster).await;
        capabilities.push(CapabilitySnapshot::new(capability, outcome.into_results()));
    }

    StatusReport {
        endpoints: roster.len(),
        capabilities,
    }
}
