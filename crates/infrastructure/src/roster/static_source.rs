use async_trait::async_trait;
use hostpulse_application::ports::RosterSource;
use hostpulse_domain::{DomainError, Endpoint};
use std::sync::Arc;

/// Fixed roster, typically the `[[roster.endpoints]]` section of the config.
#[derive(Debug, Clone, Default)]
pub struct StaticRosterSource {
    endpoints: Arc<[Endpoint]>,
}

impl StaticRosterSource {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints: endpoints.into(),
        }
    }
}

#[async_trait]
impl RosterSource for StaticRosterSource {
    async fn load_roster(&self) -> Result<Vec<Endpoint>, DomainError> {
        Ok(self.endpoints.to_vec())
    }
}
