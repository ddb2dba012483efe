//! # TutorSync Lock
//!
//! Named, time-bounded mutual exclusion for the booking path. A lock is
//! identified purely by its key string, acquired with a wait timeout and
//! held for at most a lease duration, so a crashed holder can never block
//! competitors forever.
//!
//! The trait is an injected capability: the server wires in
//! [`InMemoryLockCoordinator`], and tests can substitute any implementation
//! honoring the same wait/lease contract.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, sleep};

#[derive(Error, Debug)]
pub enum LockError {
    #[error("lock '{key}' not acquired within {wait:?}")]
    AcquisitionTimeout { key: String, wait: Duration },
}

/// Exclusive, named, lease-bounded locks.
///
/// `acquire` blocks up to `wait` for the key to become free, then holds it
/// until the returned guard is dropped or `lease` elapses, whichever comes
/// first. Guard-based acquisition guarantees release on every exit path of
/// the caller, including early returns and panics.
#[async_trait]
pub trait LockCoordinator: Send + Sync {
    async fn acquire(
        &self,
        key: &str,
        wait: Duration,
        lease: Duration,
    ) -> Result<LockGuard, LockError>;
}

/// Releases the underlying lock when dropped.
pub struct LockGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl LockGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

struct Held {
    fence: u64,
    expires_at: Instant,
}

/// In-process lock coordinator.
///
/// Acquisition polls the key table until the wait deadline; a held entry
/// whose lease deadline has passed counts as free and is claimed by the
/// next acquirer. Every grant carries a fence token, and release only
/// removes the entry when the fence still matches, so the guard of an
/// expired lease cannot evict a successor that claimed the key in the
/// meantime.
///
/// Exclusion spans one process. Multi-process deployments need a
/// [`LockCoordinator`] backed by shared infrastructure; the booking engine
/// only sees the trait.
pub struct InMemoryLockCoordinator {
    locks: Arc<Mutex<HashMap<String, Held>>>,
    fence: AtomicU64,
    poll_interval: Duration,
}

impl InMemoryLockCoordinator {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
            fence: AtomicU64::new(0),
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl Default for InMemoryLockCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockCoordinator for InMemoryLockCoordinator {
    async fn acquire(
        &self,
        key: &str,
        wait: Duration,
        lease: Duration,
    ) -> Result<LockGuard, LockError> {
        let deadline = Instant::now() + wait;

        loop {
            let now = Instant::now();
            {
                let mut locks = self
                    .locks
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);

                let free = match locks.get(key) {
                    None => true,
                    // Lease ran out: the holder crashed or stalled, claim it.
                    Some(held) => held.expires_at <= now,
                };

                if free {
                    let fence = self.fence.fetch_add(1, Ordering::Relaxed) + 1;
                    locks.insert(
                        key.to_string(),
                        Held {
                            fence,
                            expires_at: now + lease,
                        },
                    );
                    tracing::debug!(key, fence, "lock acquired");

                    let locks = Arc::clone(&self.locks);
                    let key = key.to_string();
                    return Ok(LockGuard::new(move || {
                        let mut locks =
                            locks.lock().unwrap_or_else(PoisonError::into_inner);
                        // Fenced release: a successor that claimed the key
                        // after our lease expired must not be evicted.
                        if locks.get(&key).is_some_and(|h| h.fence == fence) {
                            locks.remove(&key);
                        }
                    }));
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(LockError::AcquisitionTimeout {
                    key: key.to_string(),
                    wait,
                });
            }
            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}
