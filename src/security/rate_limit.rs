//! Sliding-window rate limiting keyed by source.
//!
//! The limiter owns a [`LedgerStore`] handed to it at construction. The
//! store only has to apply one read-modify-write atomically per key; the
//! window arithmetic lives here, so a shared store can replace
//! [`InMemoryLedger`] without touching it. Timestamps are milliseconds
//! since the Unix epoch so they mean the same thing in every process.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

/// Length of the trailing window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Requests admitted per source within one window.
pub const MAX_REQUESTS: usize = 5;

/// Storage for per-source admission timestamps (epoch milliseconds).
pub trait LedgerStore: Send + Sync + 'static {
    /// Run `f` against the timestamps recorded for `key`, holding whatever
    /// lock the store needs for the duration. Unknown keys start empty.
    fn update<R>(&self, key: &str, f: impl FnOnce(&mut VecDeque<u64>) -> R) -> R;

    /// Number of sources currently tracked.
    fn tracked_sources(&self) -> usize;
}

/// Process-local ledger. Resets on restart and is not shared between instances.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: DashMap<String, VecDeque<u64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedger {
    fn update<R>(&self, key: &str, f: impl FnOnce(&mut VecDeque<u64>) -> R) -> R {
        // The entry guard holds the shard lock, so concurrent checks for
        // the same key are serialized.
        let mut entry = self.entries.entry(key.to_owned()).or_default();
        f(entry.value_mut())
    }

    fn tracked_sources(&self) -> usize {
        self.entries.len()
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Admitted {
        /// Admissions left in the current window after this one.
        remaining: usize,
    },
    Limited {
        /// Time until the oldest recorded admission leaves the window.
        retry_after: Duration,
    },
}

impl RateDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, RateDecision::Admitted { .. })
    }
}

/// Anything that can admit or reject a source at a point in time.
///
/// Object-safe so application state can hold any limiter behind an `Arc`.
pub trait AdmissionGate: Send + Sync {
    fn check(&self, key: &str, now: SystemTime) -> RateDecision;
}

/// Rate limiter admitting at most [`MAX_REQUESTS`] per source per [`WINDOW`].
#[derive(Debug)]
pub struct SlidingWindowLimiter<S = InMemoryLedger> {
    store: S,
    window: Duration,
    max_requests: usize,
}

impl SlidingWindowLimiter<InMemoryLedger> {
    pub fn new() -> Self {
        Self::with_store(InMemoryLedger::new())
    }
}

impl Default for SlidingWindowLimiter<InMemoryLedger> {
    fn default() -> Self {
        Self::new()
    }
}

fn epoch_millis(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

impl<S: LedgerStore> SlidingWindowLimiter<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            window: WINDOW,
            max_requests: MAX_REQUESTS,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check `key` at time `now`, recording `now` if admitted.
    ///
    /// Timestamps at least one window old are dropped first. A rejected
    /// request is not recorded.
    pub fn check(&self, key: &str, now: SystemTime) -> RateDecision {
        let window_ms = u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX);
        let max_requests = self.max_requests;
        let now_ms = epoch_millis(now);

        self.store.update(key, |timestamps| {
            while let Some(&oldest) = timestamps.front() {
                if now_ms.saturating_sub(oldest) >= window_ms {
                    timestamps.pop_front();
                } else {
                    break;
                }
            }

            if timestamps.len() >= max_requests {
                let oldest = timestamps.front().copied().unwrap_or(now_ms);
                let age = now_ms.saturating_sub(oldest);
                let retry_after = Duration::from_millis(window_ms.saturating_sub(age));
                return RateDecision::Limited { retry_after };
            }

            timestamps.push_back(now_ms);
            RateDecision::Admitted {
                remaining: max_requests - timestamps.len(),
            }
        })
    }
}

impl<S: LedgerStore> AdmissionGate for SlidingWindowLimiter<S> {
    fn check(&self, key: &str, now: SystemTime) -> RateDecision {
        SlidingWindowLimiter::check(self, key, now)
    }
}
