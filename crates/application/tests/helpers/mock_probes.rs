#![allow(dead_code)]

use async_trait::async_trait;
use hostpulse_application::ports::ProbeExecutor;
use hostpulse_domain::{DomainError, ProbeKind};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

#[derive(Clone)]
pub struct MockProbeExecutor {
    responses: Arc<RwLock<HashMap<(IpAddr, ProbeKind), bool>>>,
    failing: Arc<RwLock<HashSet<IpAddr>>>,
    panicking: Arc<RwLock<HashSet<IpAddr>>>,
    calls: Arc<Mutex<Vec<(IpAddr, ProbeKind)>>>,
    call_count: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    delay: Duration,
}

impl MockProbeExecutor {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            panicking: Arc::new(RwLock::new(HashSet::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_response(&self, ip: &str, kind: ProbeKind, up: bool) {
        self.responses
            .write()
            .unwrap()
            .insert((ip.parse().unwrap(), kind), up);
    }

    pub fn set_reachable(&self, ip: &str, up: bool) {
        self.set_response(ip, ProbeKind::Reachability, up);
    }

    pub fn set_failing(&self, ip: &str) {
        self.failing.write().unwrap().insert(ip.parse().unwrap());
    }

    pub fn set_panicking(&self, ip: &str) {
        self.panicking.write().unwrap().insert(ip.parse().unwrap());
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, ip: &str, kind: ProbeKind) -> usize {
        let ip: IpAddr = ip.parse().unwrap();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, k)| *a == ip && *k == kind)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbeExecutor for MockProbeExecutor {
    async fn probe(&self, address: IpAddr, kind: ProbeKind) -> Result<bool, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push((address, kind));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.read().unwrap().contains(&address) {
            panic!("mock probe panicked for {}", address);
        }
        if self.failing.read().unwrap().contains(&address) {
            return Err(DomainError::ProbeUnavailable(
                "no socket capability".to_string(),
            ));
        }
        Ok(self
            .responses
            .read()
            .unwrap()
            .get(&(address, kind))
            .copied()
            .unwrap_or(false))
    }
}
