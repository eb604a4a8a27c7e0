#![allow(dead_code)]

use async_trait::async_trait;
use hostpulse_application::ports::{ProbeExecutor, RosterSource};
use hostpulse_domain::{DomainError, Endpoint, ProbeKind};
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// Counts probes per kind. Addresses in `up` answer `true`.
#[derive(Clone)]
pub struct MockProbeExecutor {
    up: Arc<RwLock<HashSet<IpAddr>>>,
    reachability_calls: Arc<AtomicU64>,
    service_calls: Arc<AtomicU64>,
    delay: Duration,
}

impl MockProbeExecutor {
    pub fn new() -> Self {
        Self {
            up: Arc::new(RwLock::new(HashSet::new())),
            reachability_calls: Arc::new(AtomicU64::new(0)),
            service_calls: Arc::new(AtomicU64::new(0)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_up(&self, ip: &str) {
        self.up.write().unwrap().insert(ip.parse().unwrap());
    }

    pub fn reachability_calls(&self) -> u64 {
        self.reachability_calls.load(Ordering::SeqCst)
    }

    pub fn service_calls(&self) -> u64 {
        self.service_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> u64 {
        self.reachability_calls() + self.service_calls()
    }
}

#[async_trait]
impl ProbeExecutor for MockProbeExecutor {
    async fn probe(&self, address: IpAddr, kind: ProbeKind) -> Result<bool, DomainError> {
        match kind {
            ProbeKind::Reachability => self.reachability_calls.fetch_add(1, Ordering::SeqCst),
            ProbeKind::ServicePort(_) => self.service_calls.fetch_add(1, Ordering::SeqCst),
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.up.read().unwrap().contains(&address))
    }
}

pub struct MockRosterSource {
    roster: Mutex<Vec<Endpoint>>,
    call_count: AtomicU64,
    should_fail: AtomicBool,
}

impl MockRosterSource {
    pub fn new(roster: Vec<Endpoint>) -> Self {
        Self {
            roster: Mutex::new(roster),
            call_count: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_roster(&self, roster: Vec<Endpoint>) {
        *self.roster.lock().unwrap() = roster;
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RosterSource for MockRosterSource {
    async fn load_roster(&self) -> Result<Vec<Endpoint>, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Roster("roster file unreadable".to_string()));
        }
        Ok(self.roster.lock().unwrap().clone())
    }
}

pub fn endpoint(name: &str, address: &str) -> Endpoint {
    Endpoint::new(name, address)
}
