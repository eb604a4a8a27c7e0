use crate::probe::Capability;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A roster record supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<Capability>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            capabilities: default_capabilities(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn wants(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

fn default_capabilities() -> Vec<Capability> {
    Capability::ALL.to_vec()
}

/// Roster change signal. A pure reorder leaves every endpoint identity intact,
/// so results already observed stay correct and nothing is re-probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterChange {
    pub membership_changed: bool,
}

impl RosterChange {
    pub fn membership() -> Self {
        Self {
            membership_changed: true,
        }
    }

    pub fn reorder() -> Self {
        Self {
            membership_changed: false,
        }
    }

    /// Classifies the transition between two rosters.
    ///
    /// Returns `None` when both rosters are identical (same records, same
    /// order). Records are compared as a multiset, capabilities included,
    /// since a capability edit changes which batches an endpoint belongs to.
    pub fn between(old: &[Endpoint], new: &[Endpoint]) -> Option<Self> {
        if old == new {
            return None;
        }
        if old.len() != new.len() {
            return Some(Self::membership());
        }

        let mut counts: HashMap<&Endpoint, i64> = HashMap::with_capacity(old.len());
        for endpoint in old {
            *counts.entry(endpoint).or_default() += 1;
        }
        for endpoint in new {
            *counts.entry(endpoint).or_default() -= 1;
        }

        if counts.values().all(|c| *c == 0) {
            Some(Self::reorder())
        } else {
            Some(Self::membership())
        }
    }
}
