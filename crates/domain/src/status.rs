use crate::probe::Capability;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Latest per-endpoint results for one capability, keyed by endpoint name.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitySnapshot {
    pub capability: Capability,
    pub generated_at: Option<DateTime<Utc>>,
    pub results: Vec<(String, bool)>,
}

impl CapabilitySnapshot {
    /// Placeholder published before the first dispatch completes.
    pub fn empty(capability: Capability) -> Self {
        Self {
            capability,
            generated_at: None,
            results: Vec::new(),
        }
    }

    pub fn new(capability: Capability, results: Vec<(String, bool)>) -> Self {
        Self {
            capability,
            generated_at: Some(Utc::now()),
            results,
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, up)| *up)
    }

    pub fn up_count(&self) -> usize {
        self.results.iter().filter(|(_, up)| *up).count()
    }
}
