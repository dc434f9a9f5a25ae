//! Insights — observability for theta-queue.
//!
//! Unified tracing/profiling, zero-cost when disabled. Mirrors `kaos`'s
//! `insights` module: plain functions behind `#[cfg(feature = "tracing")]`,
//! a no-op twin behind `#[cfg(not(feature = "tracing"))]`, and a
//! `init_tracy()` entry point for the `tracy` feature.
//!
//! # Usage
//!
//! ## Basic tracing (console output)
//! ```toml
//! theta-queue = { version = "0.1", features = ["tracing"] }
//! ```
//! ```rust,ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! ## Tracy profiler (real-time visualization)
//! ```toml
//! theta-queue = { version = "0.1", features = ["tracy"] }
//! ```
//! ```rust,ignore
//! theta_queue::insights::init_tracy();
//! ```
//! Then run the Tracy profiler: https://github.com/wolfpld/tracy

/// Initialize the Tracy profiler layer (call once at startup).
#[cfg(feature = "tracy")]
pub fn init_tracy() {
    use tracing_subscriber::layer::SubscriberExt;
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(tracing_tracy::TracyLayer::default()),
    )
    .expect("setup tracy layer");
}

#[cfg(not(feature = "tracy"))]
pub fn init_tracy() {}

/// A push committed a value into a slot.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_push(seq: u64) {
    let _span = tracing::trace_span!("push", seq).entered();
    crate::metrics::METRICS.record_push();
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_push(_seq: u64) {
    crate::metrics::METRICS.record_push();
}

/// A pop took a value out of a slot.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_pop(seq: u64) {
    let _span = tracing::trace_span!("pop", seq).entered();
    crate::metrics::METRICS.record_pop();
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_pop(_seq: u64) {
    crate::metrics::METRICS.record_pop();
}

/// `try_push` found the ring full and gave up without blocking.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_try_push_refused() {
    let _span = tracing::trace_span!("try_push_refused").entered();
    crate::metrics::METRICS.record_try_push_refused();
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_try_push_refused() {
    crate::metrics::METRICS.record_try_push_refused();
}

/// `try_pop` found the ring empty and gave up without blocking.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_try_pop_refused() {
    let _span = tracing::trace_span!("try_pop_refused").entered();
    crate::metrics::METRICS.record_try_pop_refused();
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_try_pop_refused() {
    crate::metrics::METRICS.record_try_pop_refused();
}

/// A thread is about to park on a slot's tag word.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_wait_begin() {
    let _span = tracing::debug_span!("wait_for_data").entered();
    crate::metrics::METRICS.record_wait_for_data();
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_wait_begin() {
    crate::metrics::METRICS.record_wait_for_data();
}

/// The park call above returned (woken or spuriously).
#[cfg(feature = "tracing")]
#[inline]
pub fn record_wait_end() {}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_wait_end() {}

/// A publish woke `woken` parked threads on a slot.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_wake(woken: usize) {
    let _span = tracing::trace_span!("wake_all", woken).entered();
    crate::metrics::METRICS.record_wake_all(woken);
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_wake(woken: usize) {
    crate::metrics::METRICS.record_wake_all(woken);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrumentation_hooks_compile_and_update_metrics() {
        record_push(0);
        record_pop(0);
        record_try_push_refused();
        record_try_pop_refused();
        record_wait_begin();
        record_wait_end();
        record_wake(2);
    }
}
