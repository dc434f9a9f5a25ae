//! Reservation counters: the `head`/`tail` ticket dispensers.
//!
//! The CAS-retry shape of `try_reserve` is the same pattern `kaos` uses in
//! `disruptor::completion_tracker::CompletionTracker::try_claim` — load,
//! compute, bounds-check, `compare_exchange_weak`, retry on failure — just
//! specialized to a single-slot reservation instead of a batch claim, and
//! cache-line padded the way `kaos`'s `PaddedAtomicU64` pads its cursors.

use std::sync::atomic::Ordering;

use crate::packed::PackedAtomicU64;
use crate::tag::Tag;

/// A `head` or `tail` ticket counter, padded to its own cache line so
/// concurrent producers and consumers don't false-share it with the other
/// counter or with the ring.
#[repr(align(64))]
pub struct Reservation(PackedAtomicU64);

impl Reservation {
    pub const fn new(initial: u64) -> Self {
        Self(PackedAtomicU64::new(initial))
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> Tag {
        Tag::new(self.0.load(order))
    }

    /// Unconditionally advance the counter and return the pre-increment
    /// value as a ticket. Never fails, never blocks.
    #[inline]
    pub fn reserve(&self) -> Tag {
        Tag::new(self.0.fetch_add(1, Ordering::AcqRel))
    }

    /// Advance the counter only if the ticket about to be handed out (the
    /// counter's current, pre-increment value) does not exceed `limit`.
    /// Returns the reserved ticket, or `None` if the counter is already
    /// past `limit`. Note the check is on the *ticket*, not the
    /// post-increment counter — `limit` itself is a valid, issuable ticket
    /// (e.g. `try_push`'s limit is the highest producer ticket that still
    /// maps to a free slot).
    pub fn try_reserve(&self, limit: Tag) -> Option<Tag> {
        let mut expected = self.0.load(Ordering::Relaxed);
        loop {
            if expected > limit.sequence() {
                return None;
            }
            let desired = expected.wrapping_add(1);
            match self.0.compare_exchange_weak(
                expected,
                desired,
                Ordering::Release,
                Ordering::Relaxed,
            ) {
                Ok(prev) => return Some(Tag::new(prev)),
                Err(witnessed) => expected = witnessed,
            }
        }
    }
}
