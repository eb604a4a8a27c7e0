use hostpulse_domain::ProbeKind;
use std::collections::HashMap;
use std::hash::Hash;

/// One item of a probe batch. The token is never interpreted; it only lets the
/// caller re-associate the result with its own state.
#[derive(Debug, Clone)]
pub struct ProbeRequest<T> {
    pub token: T,
    pub address: String,
    pub kind: ProbeKind,
}

impl<T> ProbeRequest<T> {
    pub fn new(token: T, address: impl Into<String>, kind: ProbeKind) -> Self {
        Self {
            token,
            address: address.into(),
            kind,
        }
    }
}

/// Where a boolean result came from. Diagnostic only; an invalid address and
/// an unreachable host both read as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    InvalidAddress,
    Cache,
    Probe,
}

#[derive(Debug, Clone)]
pub struct ProbeOutcome<T> {
    pub token: T,
    pub address: String,
    pub kind: ProbeKind,
    pub reachable: bool,
    pub source: ResultSource,
}

/// Resolved batch, one outcome per request, in request order.
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    outcomes: Vec<ProbeOutcome<T>>,
    unique_probes: usize,
}

impl<T> BatchOutcome<T> {
    pub(crate) fn new(outcomes: Vec<ProbeOutcome<T>>, unique_probes: usize) -> Self {
        Self {
            outcomes,
            unique_probes,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeOutcome<T>> {
        self.outcomes.iter()
    }

    pub fn outcomes(&self) -> &[ProbeOutcome<T>] {
        &self.outcomes
    }

    /// Number of outcomes resolved from the given source.
    pub fn count(&self, source: ResultSource) -> usize {
        self.outcomes.iter().filter(|o| o.source == source).count()
    }

    /// Live probes actually issued; duplicates within the batch share one.
    pub fn unique_probes(&self) -> usize {
        self.unique_probes
    }

    pub fn up_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.reachable).count()
    }

    /// `(token, reachable)` pairs in request order.
    pub fn into_results(self) -> Vec<(T, bool)> {
        self.outcomes
            .into_iter()
            .map(|o| (o.token, o.reachable))
            .collect()
    }
}

impl<T: Eq + Hash> BatchOutcome<T> {
    pub fn into_map(self) -> HashMap<T, bool> {
        self.outcomes
            .into_iter()
            .map(|o| (o.token, o.reachable))
            .collect()
    }
}

impl<T> IntoIterator for BatchOutcome<T> {
    type Item = ProbeOutcome<T>;
    type IntoIter = std::vec::IntoIter<ProbeOutcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
