//! The ring's per-slot cell.
//!
//! The original source stores `{value: T, tag: Tag}` as one 128-bit word,
//! atomically exchanged as a unit (`examples/original_source/src/
//! mpmc_queue.h`'s `Data` union). Rust has no stable 128-bit atomic, and a
//! hand-rolled one would need per-target assembly no other part of this
//! crate needs — so, per SPEC_FULL.md §9's Design Notes, this splits `Data`
//! into two padded 64-bit atomics: `value` and `tag`. The tag is the commit
//! point: a producer writes `value` first (`Relaxed` — nothing may read it
//! until the paired tag store), then commits by swapping `tag` (`AcqRel`),
//! which is exactly the ordering SPEC_FULL.md §5 describes for the
//! split-word realization.

use std::sync::atomic::Ordering;

use bytemuck::Pod;

use crate::packed::PackedAtomicU64;
use crate::tag::Tag;

/// One ring slot, cache-line padded so adjacent slots never false-share.
#[repr(align(64))]
pub struct Slot<T> {
    value: PackedAtomicU64,
    tag: PackedAtomicU64,
    _marker: std::marker::PhantomData<T>,
}

/// Bit-cast `T` (`size_of::<T>() <= 8`) into a zero-extended `u64` and back.
/// `Pod` (a stricter, checkable stand-in for "trivially copyable") guarantees
/// the bytes round-trip with no padding surprises.
#[inline]
fn to_bits<T: Pod>(value: T) -> u64 {
    debug_assert!(std::mem::size_of::<T>() <= 8, "slot payload must fit in 8 bytes");
    let mut bytes = [0u8; 8];
    let src = bytemuck::bytes_of(&value);
    bytes[..src.len()].copy_from_slice(src);
    u64::from_ne_bytes(bytes)
}

#[inline]
fn from_bits<T: Pod>(bits: u64) -> T {
    let bytes = bits.to_ne_bytes();
    *bytemuck::from_bytes(&bytes[..std::mem::size_of::<T>()])
}

impl<T: Pod> Slot<T> {
    /// `initial_tag` is `C(i)` for slot index `i` — "this slot was just
    /// consumed at sequence `i`; the producer holding ticket `P(i + N)` is
    /// next" (SPEC_FULL.md §3, Lifecycle).
    pub fn new(initial_tag: Tag) -> Self {
        Self {
            value: PackedAtomicU64::new(0),
            tag: PackedAtomicU64::new(initial_tag.raw()),
            _marker: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn load_tag(&self, order: Ordering) -> Tag {
        Tag::new(self.tag.load(order))
    }

    /// Address used as the park/unpark key for this slot's blocking waiters.
    #[inline]
    pub fn park_key(&self) -> usize {
        self.tag.as_ptr() as usize
    }

    /// The tag word itself, for `park::wait_for_data`'s CAS-and-park dance.
    #[inline]
    pub(crate) fn tag_word(&self) -> &PackedAtomicU64 {
        &self.tag
    }

    #[inline]
    pub fn cas_tag_weak(
        &self,
        current: Tag,
        new: Tag,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Tag, Tag> {
        self.tag
            .compare_exchange_weak(current.raw(), new.raw(), success, failure)
            .map(Tag::new)
            .map_err(Tag::new)
    }

    /// Producer publish: write the value, then commit by swapping in the new
    /// (waiting-cleared) producer tag. Returns the tag that was replaced, so
    /// the caller can tell whether a waiter needs waking.
    pub fn publish(&self, value: T, new_tag: Tag) -> Tag {
        self.value.store(to_bits(value), Ordering::Relaxed);
        Tag::new(self.tag.swap(new_tag.raw(), Ordering::AcqRel))
    }

    /// Consumer take: read the value written by the paired producer (safe
    /// because the caller has already done an `Acquire` load on `tag`
    /// confirming pairing, and only one ticket holder may touch this slot),
    /// then commit the slot to the given consumer tag. Returns `(value, old
    /// tag)`.
    pub fn take(&self, new_tag: Tag) -> (T, Tag) {
        let value = from_bits(self.value.load(Ordering::Relaxed));
        let old = Tag::new(self.tag.swap(new_tag.raw(), Ordering::AcqRel));
        (value, old)
    }
}

// SAFETY: all shared state is behind atomics; `T` is `Pod` (no interior
// mutability, no non-'static borrows).
unsafe impl<T: Pod> Send for Slot<T> {}
unsafe impl<T: Pod> Sync for Slot<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_roundtrip_u64_and_smaller_types() {
        assert_eq!(from_bits::<u64>(to_bits(0xDEAD_BEEFu64)), 0xDEAD_BEEF);
        assert_eq!(from_bits::<u32>(to_bits(42u32)), 42);
        assert_eq!(from_bits::<i8>(to_bits(-5i8)), -5);
    }

    #[test]
    fn publish_then_take_roundtrips_value_and_reports_waiting() {
        let slot: Slot<u64> = Slot::new(Tag::new_consumer(0));

        let old = slot.publish(99, Tag::new_producer(8).clear_waiting());
        assert!(!old.is_waiting());

        let (value, old) = slot.take(Tag::new_consumer(8));
        assert_eq!(value, 99);
        assert!(!old.is_waiting());
        assert!(old.is_producer());
    }

    #[test]
    fn publish_reports_prior_waiting_bit() {
        let slot: Slot<u64> = Slot::new(Tag::new_consumer(0));
        // Simulate a consumer having installed the waiting bit on C(0).
        slot.cas_tag_weak(
            Tag::new_consumer(0),
            Tag::new_consumer(0).mark_as_waiting(),
            Ordering::Release,
            Ordering::Relaxed,
        )
        .unwrap();

        let old = slot.publish(1, Tag::new_producer(8));
        assert!(old.is_waiting());
    }
}
