use hostpulse_domain::{Endpoint, RosterChange};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

const SIGNAL_CAPACITY: usize = 16;

/// Shared current roster. Readers take a cloned snapshot so a batch never
/// holds the lock across probes.
#[derive(Clone, Default)]
pub struct RosterHandle {
    inner: Arc<RwLock<Vec<Endpoint>>>,
}

impl RosterHandle {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(endpoints)),
        }
    }

    pub async fn snapshot(&self) -> Vec<Endpoint> {
        self.inner.read().await.clone()
    }

    /// Swaps in `endpoints` and reports how it differs from what was there.
    pub async fn replace(&self, endpoints: Vec<Endpoint>) -> Option<RosterChange> {
        let mut current = self.inner.write().await;
        let change = RosterChange::between(&current, &endpoints);
        if change.is_some() {
            *current = endpoints;
        }
        change
    }
}

/// Fan-out of roster change signals to the scheduler streams.
#[derive(Clone)]
pub struct RosterChangeNotifier {
    tx: broadcast::Sender<RosterChange>,
}

impl RosterChangeNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RosterChange> {
        self.tx.subscribe()
    }

    /// Returns the number of streams that will see the signal.
    pub fn notify(&self, change: RosterChange) -> usize {
        match self.tx.send(change) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!(
                    membership_changed = change.membership_changed,
                    "Roster change with no listeners"
                );
                0
            }
        }
    }
}

impl Default for RosterChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
