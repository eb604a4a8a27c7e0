use super::batch::{BatchOutcome, ProbeOutcome, ProbeRequest, ResultSource};
use crate::ports::ProbeExecutor;
use crate::services::ResultCache;
use futures::FutureExt;
use hostpulse_domain::{parse_address, DomainError, ProbeKind};
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

type ProbeKey = (ProbeKind, IpAddr);

/// Resolves a batch of probe requests against the result cache and probes
/// only the misses, concurrently.
///
/// Requests sharing a `(kind, address)` key within one batch share a single
/// live probe. A failing or panicking probe reads as `false` for its entries
/// and never fails the batch.
pub struct RefreshBatchUseCase {
    executor: Arc<dyn ProbeExecutor>,
    cache: Arc<ResultCache>,
    limiter: Option<Arc<Semaphore>>,
}

impl RefreshBatchUseCase {
    pub fn new(executor: Arc<dyn ProbeExecutor>, cache: Arc<ResultCache>) -> Self {
        Self {
            executor,
            cache,
            limiter: None,
        }
    }

    /// Caps live probes in flight at once. `None` keeps unbounded fan-out.
    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.limiter = limit.filter(|n| *n > 0).map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub async fn execute<T>(&self, requests: Vec<ProbeRequest<T>>) -> BatchOutcome<T> {
        let mut slots: Vec<Option<(bool, ResultSource)>> = Vec::with_capacity(requests.len());
        let mut pending: FxHashMap<ProbeKey, Vec<usize>> = FxHashMap::default();

        for (idx, request) in requests.iter().enumerate() {
            let Some(ip) = parse_address(&request.address) else {
                slots.push(Some((false, ResultSource::InvalidAddress)));
                continue;
            };
            match self.cache.lookup(request.kind, ip) {
                Some(result) => slots.push(Some((result, ResultSource::Cache))),
                None => {
                    slots.push(None);
                    pending.entry((request.kind, ip)).or_default().push(idx);
                }
            }
        }

        let unique_probes = pending.len();
        debug!(
            requests = requests.len(),
            pending = unique_probes,
            "Dispatching probe batch"
        );

        let mut tasks = JoinSet::new();
        for &key in pending.keys() {
            let executor = Arc::clone(&self.executor);
            let limiter = self.limiter.clone();
            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let (kind, ip) = key;
                let result = AssertUnwindSafe(executor.probe(ip, kind))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        Err(DomainError::ProbeUnavailable("probe panicked".to_string()))
                    });
                (key, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let ((kind, ip), result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    warn!(error = %e, "Probe task aborted");
                    continue;
                }
            };

            let reachable = match result {
                Ok(reachable) => reachable,
                Err(e) => {
                    warn!(address = %ip, kind = %kind, error = %e, "Probe failed");
                    false
                }
            };

            self.cache.put(kind, ip, reachable);
            if let Some(indices) = pending.get(&(kind, ip)) {
                for &idx in indices {
                    slots[idx] = Some((reachable, ResultSource::Probe));
                }
            }
        }

        let outcomes: Vec<ProbeOutcome<T>> = requests
            .into_iter()
            .zip(slots)
            .map(|(request, slot)| {
                let (reachable, source) = slot.unwrap_or((false, ResultSource::Probe));
                ProbeOutcome {
                    token: request.token,
                    address: request.address,
                    kind: request.kind,
                    reachable,
                    source,
                }
            })
            .collect();

        BatchOutcome::new(outcomes, unique_probes)
    }

    /// Like `execute`, but abandons in-flight probes when `cancel` fires.
    /// No partial result is returned.
    pub async fn execute_until<T>(
        &self,
        requests: Vec<ProbeRequest<T>>,
        cancel: &CancellationToken,
    ) -> Result<BatchOutcome<T>, DomainError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DomainError::Cancelled),
            outcome = self.execute(requests) => Ok(outcome),
        }
    }
}
