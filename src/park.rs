//! The blocking protocol: CAS-install a waiting bit, then sleep on it.
//!
//! This is `wait_for_data` from SPEC_FULL.md §4.5 / the original source's
//! `wait_for_data` member (`examples/original_source/src/mpmc_queue.h`).
//! The original sleeps via `std::atomic<Tag>::wait`/`notify_all` (C++20).
//! Rust's `std` has no equivalent for an arbitrary atomic word, so this
//! crate uses `parking_lot_core`'s address-keyed park/unpark queue instead
//! of hand-rolling a `libc::syscall(SYS_futex, ...)` wrapper the way
//! `neerajchowdary889-DMXP-MPMC`'s `Core/futex.rs` and `hdds-team-hdds`'s
//! `transport/shm/futex.rs` do — see SPEC_FULL.md §4.5 for the rationale.
//! `parking_lot_core::park`'s `validate` closure runs under the park
//! queue's internal lock, which is what gives the CAS-then-wait sequence
//! below its no-lost-wakeup guarantee.

use std::sync::atomic::Ordering;

use parking_lot_core::{DEFAULT_PARK_TOKEN, DEFAULT_UNPARK_TOKEN};

use crate::packed::PackedAtomicU64;
use crate::tag::Tag;

/// Called when a claimant observes a tag that doesn't pair with its ticket.
/// Installs the waiting bit (if not already installed) and parks until the
/// counterpart thread wakes this slot, or until the CAS reveals the slot
/// became ready in the meantime. Spurious wakes are fine: every call site
/// loops back to re-check pairing after this returns.
pub fn wait_for_data(tag: &PackedAtomicU64, claimant: Tag, mut observed: Tag, wrap_delta: u64) {
    loop {
        let want = observed.mark_as_waiting();

        if observed == want {
            park_until_woken(tag, want);
            return;
        }

        match tag.compare_exchange_weak(
            observed.raw(),
            want.raw(),
            Ordering::Release,
            Ordering::Relaxed,
        ) {
            Ok(_) => {
                park_until_woken(tag, want);
                return;
            }
            Err(witnessed) => {
                observed = Tag::new(witnessed);
                if claimant.pairs_with(observed, wrap_delta) {
                    return;
                }
            }
        }
    }
}

fn park_until_woken(tag: &PackedAtomicU64, want: Tag) {
    let key = tag.as_ptr() as usize;
    crate::insights::record_wait_begin();

    // SAFETY: `key` is the address of `tag`, which outlives this call (it's
    // embedded in a `Slot` owned by the queue's boxed ring for the queue's
    // whole lifetime); `validate` only reads through that same reference.
    unsafe {
        let _ = parking_lot_core::park(
            key,
            || tag.load(Ordering::Acquire) == want.raw(),
            || {},
            |_, _| {},
            DEFAULT_PARK_TOKEN,
            None,
        );
    }
    crate::insights::record_wait_end();
}

/// Wake every thread parked on `tag`'s address. Called by the publisher
/// after it commits a new tag, only when the tag it replaced had its
/// waiting bit set.
pub fn wake_all(tag: &PackedAtomicU64) {
    let key = tag.as_ptr() as usize;
    // SAFETY: same key as `park_until_woken` uses for this slot.
    let woken = unsafe { parking_lot_core::unpark_all(key, DEFAULT_UNPARK_TOKEN) };
    if woken > 0 {
        crate::insights::record_wake(woken);
    }
}
