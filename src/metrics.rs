//! Metrics for the queue.
//!
//! Lightweight lock-free counters for observability, grounded on `kaos`'s
//! `metrics::Metrics` (same shape: a `static` of plain `AtomicU64` fields,
//! a `snapshot()` into a plain-data struct, a `Display` impl for quick
//! logging). Counts pushes/pops and the blocking-path events `push`/`pop`
//! go through when a slot isn't ready yet.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics counters for one process. Queues don't carry their own
/// `Metrics` instance — there is one process-wide set, matching `kaos`'s
/// `METRICS` static, since the point is cheap ambient observability, not
/// per-queue accounting.
pub struct Metrics {
    pub items_pushed: AtomicU64,
    pub items_popped: AtomicU64,
    pub try_push_refused: AtomicU64,
    pub try_pop_refused: AtomicU64,
    pub wait_for_data_entries: AtomicU64,
    pub wake_all_calls: AtomicU64,
    pub threads_woken: AtomicU64,
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            items_pushed: AtomicU64::new(0),
            items_popped: AtomicU64::new(0),
            try_push_refused: AtomicU64::new(0),
            try_pop_refused: AtomicU64::new(0),
            wait_for_data_entries: AtomicU64::new(0),
            wake_all_calls: AtomicU64::new(0),
            threads_woken: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_push(&self) {
        self.items_pushed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_pop(&self) {
        self.items_popped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_try_push_refused(&self) {
        self.try_push_refused.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_try_pop_refused(&self) {
        self.try_pop_refused.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_wait_for_data(&self) {
        self.wait_for_data_entries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_wake_all(&self, woken: usize) {
        self.wake_all_calls.fetch_add(1, Ordering::Relaxed);
        self.threads_woken.fetch_add(woken as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            items_pushed: self.items_pushed.load(Ordering::Relaxed),
            items_popped: self.items_popped.load(Ordering::Relaxed),
            try_push_refused: self.try_push_refused.load(Ordering::Relaxed),
            try_pop_refused: self.try_pop_refused.load(Ordering::Relaxed),
            wait_for_data_entries: self.wait_for_data_entries.load(Ordering::Relaxed),
            wake_all_calls: self.wake_all_calls.load(Ordering::Relaxed),
            threads_woken: self.threads_woken.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.items_pushed.store(0, Ordering::Relaxed);
        self.items_popped.store(0, Ordering::Relaxed);
        self.try_push_refused.store(0, Ordering::Relaxed);
        self.try_pop_refused.store(0, Ordering::Relaxed);
        self.wait_for_data_entries.store(0, Ordering::Relaxed);
        self.wake_all_calls.store(0, Ordering::Relaxed);
        self.threads_woken.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub items_pushed: u64,
    pub items_popped: u64,
    pub try_push_refused: u64,
    pub try_pop_refused: u64,
    pub wait_for_data_entries: u64,
    pub wake_all_calls: u64,
    pub threads_woken: u64,
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pushed={} popped={} try_push_refused={} try_pop_refused={} waits={} wakes={} woken={}",
            self.items_pushed,
            self.items_popped,
            self.try_push_refused,
            self.try_pop_refused,
            self.wait_for_data_entries,
            self.wake_all_calls,
            self.threads_woken,
        )
    }
}

/// Global metrics instance.
pub static METRICS: Metrics = Metrics::new();
