use hostpulse_domain::{Capability, CapabilitySnapshot};
use std::sync::Arc;
use tokio::sync::watch;

/// Latest snapshot per capability, one `watch` channel each.
///
/// Subscribers are woken every time a batch for their capability completes,
/// even when no result changed.
pub struct StatusBoard {
    reachability: watch::Sender<Arc<CapabilitySnapshot>>,
    remote_desktop: watch::Sender<Arc<CapabilitySnapshot>>,
    shell: watch::Sender<Arc<CapabilitySnapshot>>,
}

fn empty_channel(capability: Capability) -> watch::Sender<Arc<CapabilitySnapshot>> {
    watch::Sender::new(Arc::new(CapabilitySnapshot::empty(capability)))
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            reachability: empty_channel(Capability::Reachability),
            remote_desktop: empty_channel(Capability::RemoteDesktop),
            shell: empty_channel(Capability::Shell),
        }
    }

    fn sender(&self, capability: Capability) -> &watch::Sender<Arc<CapabilitySnapshot>> {
        match capability {
            Capability::Reachability => &self.reachability,
            Capability::RemoteDesktop => &self.remote_desktop,
            Capability::Shell => &self.shell,
        }
    }

    pub fn subscribe(&self, capability: Capability) -> watch::Receiver<Arc<CapabilitySnapshot>> {
        self.sender(capability).subscribe()
    }

    pub fn latest(&self, capability: Capability) -> Arc<CapabilitySnapshot> {
        self.sender(capability).borrow().clone()
    }

    pub fn publish(&self, snapshot: CapabilitySnapshot) {
        self.sender(snapshot.capability).send_replace(Arc::new(snapshot));
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty_for_every_capability() {
        let board = StatusBoard::new();

        for capability in Capability::ALL {
            let snapshot = board.latest(capability);
            assert_eq!(snapshot.capability, capability);
            assert!(snapshot.generated_at.is_none());
        }
    }

    #[tokio::test]
    async fn test_publish_wakes_only_matching_subscribers() {
        let board = StatusBoard::new();
        let mut shell = board.subscribe(Capability::Shell);
        let rdp = board.subscribe(Capability::RemoteDesktop);

        board.publish(CapabilitySnapshot::new(
            Capability::Shell,
            vec![("h1".to_string(), true)],
        ));

        assert!(shell.has_changed().unwrap());
        assert!(!rdp.has_changed().unwrap());
        assert_eq!(shell.borrow_and_update().get("h1"), Some(true));
        assert_eq!(board.latest(Capability::Shell).up_count(), 1);
    }
}
