//! A single word-sized atomic with bit-field accessors.
//!
//! This is the Rust stand-in for the original source's `PackedAtomic<Types...>`
//! template. That template computes field offsets for an arbitrary list of
//! types at compile time; this crate has exactly one real use of it — a
//! 64-bit word carrying a sequence plus two flag bits — so rather than port
//! the variadic offset-computation machinery, `get_field`/`set_field` take
//! the offset and width directly. See DESIGN.md / SPEC_FULL.md §9 for why.

use std::sync::atomic::{AtomicU64, Ordering};

/// One aligned 64-bit word, loadable/storable/CAS-able/fetch-add-able as a
/// unit, with non-atomic bit-field access at known offsets.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct PackedAtomicU64(AtomicU64);

impl PackedAtomicU64 {
    pub const fn new(raw: u64) -> Self {
        Self(AtomicU64::new(raw))
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> u64 {
        self.0.load(order)
    }

    #[inline]
    pub fn store(&self, value: u64, order: Ordering) {
        self.0.store(value, order)
    }

    #[inline]
    pub fn swap(&self, value: u64, order: Ordering) -> u64 {
        self.0.swap(value, order)
    }

    #[inline]
    pub fn fetch_add(&self, delta: u64, order: Ordering) -> u64 {
        self.0.fetch_add(delta, order)
    }

    #[inline]
    pub fn compare_exchange_weak(
        &self,
        current: u64,
        new: u64,
        success: Ordering,
        failure: Ordering,
    ) -> Result<u64, u64> {
        self.0.compare_exchange_weak(current, new, success, failure)
    }

    /// Address of the underlying word, used as a park/unpark key.
    #[inline]
    pub fn as_ptr(&self) -> *const AtomicU64 {
        &self.0
    }
}

/// Read a `bits`-wide field starting at bit `offset` out of a raw word.
#[inline]
pub const fn get_field(raw: u64, offset: u32, bits: u32) -> u64 {
    let mask = field_mask(bits);
    (raw >> offset) & mask
}

/// Return `raw` with its `bits`-wide field at bit `offset` replaced by
/// `value` (only the low `bits` bits of `value` are used).
#[inline]
pub const fn set_field(raw: u64, offset: u32, bits: u32, value: u64) -> u64 {
    let mask = field_mask(bits);
    (raw & !(mask << offset)) | ((value & mask) << offset)
}

#[inline]
const fn field_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
