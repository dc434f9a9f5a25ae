//! The queue engine: wires reservation counters, slots, and the blocking
//! protocol into the public `push`/`try_push`/`pop`/`try_pop` surface.
//!
//! Grounded on `kaos::disruptor::mpmc::mpmc_ring_buffer::MpmcRingBuffer` —
//! same overall shape (a boxed slice of slots plus a pair of cursor atomics),
//! generalized from batch claim/publish to the single-ticket tag protocol of
//! SPEC_FULL.md §4.

use std::sync::atomic::Ordering;

use bytemuck::Pod;

use crate::error::{QueueError, Result};
use crate::park;
use crate::reservation::Reservation;
use crate::slot::Slot;
use crate::tag::Tag;

/// Construction-time knobs. Capacity is fixed by the const generic `N`, not
/// by a field here — see SPEC_FULL.md §6. Currently the only knob is a
/// label used to tag `tracing` spans/metrics with a human-readable name;
/// reserved for future tuning hooks, matching `kaos::disruptor::
/// RingBufferConfig`'s role without duplicating its capacity/consumer-count
/// validation (this queue can't get capacity wrong by construction the way
/// a runtime `size` field could).
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueOpts {
    pub label: Option<&'static str>,
}

impl QueueOpts {
    pub const fn new() -> Self {
        Self { label: None }
    }

    pub const fn with_label(label: &'static str) -> Self {
        Self { label: Some(label) }
    }
}

/// A bounded, lock-free, multi-producer/multi-consumer queue of `N` slots.
///
/// `T` must be `Pod` ("trivially copyable" per SPEC_FULL.md §3) and no
/// larger than 8 bytes, so it fits in a slot's single 64-bit value word.
// `128` here must track `constants::DEFAULT_CAPACITY` (a plain literal is
// required in this position; const generic defaults can't reference a
// `pub const` path across all the editions this crate targets).
pub struct MpmcQueue<T: Pod, const N: usize = 128> {
    ring: Box<[Slot<T>]>,
    head: Reservation,
    tail: Reservation,
    mask: u64,
    wrap_delta: u64,
    opts: QueueOpts,
}

impl<T: Pod, const N: usize> MpmcQueue<T, N> {
    /// Build a queue with default options. Panics if `N` is not a nonzero
    /// power of two, or if `T` doesn't fit a slot's value word — see
    /// `try_with_opts` for the fallible form.
    pub fn new() -> Self {
        Self::with_opts(QueueOpts::new())
    }

    /// Build a queue, panicking with a descriptive message on the same
    /// misuse `try_with_opts` rejects. A thin convenience wrapper over
    /// `try_with_opts`, matching how `kaos::disruptor::mpmc::
    /// MpmcRingBuffer::new` itself returns a `Result` while callers that
    /// treat a bad compile-time size as a programmer error `.expect()` it.
    pub fn with_opts(opts: QueueOpts) -> Self {
        Self::try_with_opts(opts).expect("invalid MpmcQueue configuration")
    }

    /// Build a queue, returning an error instead of panicking if `N` is not
    /// a nonzero power of two, or if `T` doesn't fit a slot's value word.
    /// `N`'s validity can't be checked by the type system on stable Rust for
    /// an arbitrary const generic (see SPEC_FULL.md §7), so this is the one
    /// runtime-checked construction path this crate has.
    pub fn try_with_opts(opts: QueueOpts) -> Result<Self> {
        Self::validate_layout()?;

        let ring: Box<[Slot<T>]> = (0..N)
            .map(|i| Slot::new(Tag::new_consumer(i as u64)))
            .collect();

        Ok(Self {
            ring,
            head: Reservation::new(N as u64),
            tail: Reservation::new(N as u64),
            mask: (N as u64) - 1,
            wrap_delta: N as u64,
            opts,
        })
    }

    fn validate_layout() -> Result<()> {
        if N == 0 || !N.is_power_of_two() {
            return Err(QueueError::config(format!(
                "queue capacity must be a nonzero power of two, got {N}"
            )));
        }
        if std::mem::size_of::<T>() > 8 {
            return Err(QueueError::config(format!(
                "queue payload must fit in 8 bytes, {} is {} bytes",
                std::any::type_name::<T>(),
                std::mem::size_of::<T>()
            )));
        }
        Ok(())
    }

    #[inline]
    fn slot(&self, ticket: Tag) -> &Slot<T> {
        &self.ring[ticket.to_index(self.mask)]
    }

    /// Block until `ticket`'s slot is ready, per spec.md §4.4/§4.5's
    /// poll-or-park loop. Returns the tag observed once it pairs.
    fn await_pairing(&self, ticket: Tag, slot: &Slot<T>) {
        let mut observed = slot.load_tag(Ordering::Acquire);
        while !ticket.pairs_with(observed, self.wrap_delta) {
            park::wait_for_data(slot.tag_word(), ticket, observed, self.wrap_delta);
            observed = slot.load_tag(Ordering::Acquire);
        }
    }

    /// Insert `value`, blocking the calling thread if the ring is full until
    /// a consumer frees a slot.
    pub fn push(&self, value: T) {
        // `reserve`/`try_reserve` hand back a plain flag-less sequence; the
        // role bit has to be set to the counter's role before the ticket is
        // used for pairing, since `Tag::predecessor` branches on it (see
        // DESIGN.md — tail tickets are producer tickets).
        let ticket = self.tail.reserve().mark_as_producer();
        let slot = self.slot(ticket);
        self.await_pairing(ticket, slot);

        let old = slot.publish(value, ticket.clear_waiting());
        if old.is_waiting() {
            park::wake_all(slot.tag_word());
        }
        crate::insights::record_push(ticket.sequence());
    }

    /// Insert `value` without blocking. Returns `false` if the ring is
    /// currently full.
    pub fn try_push(&self, value: T) -> bool {
        let limit = Tag::new(self.head.load(Ordering::Relaxed).sequence() + self.wrap_delta - 1);
        let ticket = match self.tail.try_reserve(limit) {
            Some(t) => t.mark_as_producer(),
            None => {
                crate::insights::record_try_push_refused();
                return false;
            }
        };

        let slot = self.slot(ticket);
        self.await_pairing(ticket, slot);

        let old = slot.publish(value, ticket.clear_waiting());
        if old.is_waiting() {
            park::wake_all(slot.tag_word());
        }
        crate::insights::record_push(ticket.sequence());
        true
    }

    /// Remove and return the next value, blocking the calling thread if the
    /// ring is empty until a producer publishes one.
    pub fn pop(&self) -> T {
        let ticket = self.head.reserve().mark_as_consumer();
        let slot = self.slot(ticket);
        self.await_pairing(ticket, slot);

        let (value, old) = slot.take(ticket.clear_waiting());
        if old.is_waiting() {
            park::wake_all(slot.tag_word());
        }
        crate::insights::record_pop(ticket.sequence());
        value
    }

    /// Remove and return the next value without blocking. Returns `None` if
    /// the ring is currently empty.
    pub fn try_pop(&self) -> Option<T> {
        let limit = Tag::new(self.tail.load(Ordering::Relaxed).sequence().wrapping_sub(1));
        let ticket = match self.head.try_reserve(limit) {
            Some(t) => t.mark_as_consumer(),
            None => {
                crate::insights::record_try_pop_refused();
                return None;
            }
        };

        let slot = self.slot(ticket);
        self.await_pairing(ticket, slot);

        let (value, old) = slot.take(ticket.clear_waiting());
        if old.is_waiting() {
            park::wake_all(slot.tag_word());
        }
        crate::insights::record_pop(ticket.sequence());
        Some(value)
    }

    /// Items currently enqueued (not a snapshot guarantee under
    /// concurrency — see spec.md §8's "advisory only" note on `size`).
    pub fn size(&self) -> usize {
        // `head` must be read before `tail`: for any two observation times
        // T1 <= T2, head(T1) <= head(T2) <= tail(T2), so a head-then-tail
        // read can never see a head past the tail it pairs with. Reading
        // tail first would let concurrent activity between the two loads
        // push head past the stale tail, wrapping this subtraction instead
        // of staying in the advisory "never negative" bound.
        let head = self.head.load(Ordering::Relaxed).sequence();
        let tail = self.tail.load(Ordering::Relaxed).sequence();
        tail.wrapping_sub(head) as usize
    }

    /// Ring capacity, i.e. `N`.
    pub fn capacity(&self) -> usize {
        N
    }

    /// The label this queue was constructed with, if any.
    pub fn label(&self) -> Option<&'static str> {
        self.opts.label
    }
}

impl<T: Pod, const N: usize> Default for MpmcQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: every field is either `Sync` on its own (`Reservation`, plain
// data) or a `Slot<T>`, which is `Send + Sync` for `T: Pod`.
unsafe impl<T: Pod, const N: usize> Sync for MpmcQueue<T, N> {}
unsafe impl<T: Pod, const N: usize> Send for MpmcQueue<T, N> {}
