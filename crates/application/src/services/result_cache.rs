use dashmap::DashMap;
use hostpulse_domain::ProbeKind;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

type CacheKey = (ProbeKind, IpAddr);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    result: bool,
    observed_at: Instant,
}

/// TTL-bounded store of the last probe result per `(kind, address)`.
///
/// Failures are cached exactly like successes. Entries are never evicted;
/// staleness is checked lazily on lookup, and the map stays bounded by the
/// roster size. Same-key writers race as last-write-wins.
pub struct ResultCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_valid(&self, kind: ProbeKind, address: IpAddr) -> bool {
        self.entries
            .get(&(kind, address))
            .is_some_and(|e| e.observed_at.elapsed() < self.ttl)
    }

    /// Last known result, fresh or not. Pair with `is_valid`, or use `lookup`.
    pub fn get(&self, kind: ProbeKind, address: IpAddr) -> Option<bool> {
        self.entries.get(&(kind, address)).map(|e| e.result)
    }

    /// Validity check and read under one shard guard.
    pub fn lookup(&self, kind: ProbeKind, address: IpAddr) -> Option<bool> {
        self.entries
            .get(&(kind, address))
            .filter(|e| e.observed_at.elapsed() < self.ttl)
            .map(|e| e.result)
    }

    pub fn put(&self, kind: ProbeKind, address: IpAddr, result: bool) {
        self.entries.insert(
            (kind, address),
            CacheEntry {
                result,
                observed_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
