//! The per-slot tag: sequence + role + waiting bit, packed into one `u64`.
//!
//! Ported from `theta::Tag` (`examples/original_source/src/types.h`), with
//! the role/waiting semantics and the `predecessor`/`pairs_with` arithmetic
//! preserved exactly (see SPEC_FULL.md §4.2 and the Design Notes §9
//! asymmetry note: `pairs_with` must ignore the waiting bit on the
//! *observed* side only).

use crate::constants::{CONSUMER_FLAG, SEQUENCE_INCREMENT, SEQUENCE_MASK, WAITING_FLAG};
use crate::packed::{get_field, set_field};

const WAITING_OFFSET: u32 = 62;
const ROLE_OFFSET: u32 = 63;

/// Which side of a pairing a tag represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Producer,
    Consumer,
}

/// A snapshot of a slot's tag word: `{sequence: 62 bits, waiting: 1 bit,
/// role: 1 bit}`. Cheap to copy; all arithmetic is on the raw `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag(u64);

impl Tag {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn new_producer(seq: u64) -> Self {
        Self(seq)
    }

    #[inline]
    pub const fn new_consumer(seq: u64) -> Self {
        Self(set_field(seq, ROLE_OFFSET, 1, 1))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The sequence field (top two flag bits masked off).
    #[inline]
    pub const fn sequence(self) -> u64 {
        self.0 & SEQUENCE_MASK
    }

    #[inline]
    pub const fn role(self) -> Role {
        if get_field(self.0, ROLE_OFFSET, 1) == 0 {
            Role::Producer
        } else {
            Role::Consumer
        }
    }

    #[inline]
    pub const fn is_producer(self) -> bool {
        matches!(self.role(), Role::Producer)
    }

    #[inline]
    pub const fn is_consumer(self) -> bool {
        matches!(self.role(), Role::Consumer)
    }

    #[inline]
    pub const fn is_waiting(self) -> bool {
        get_field(self.0, WAITING_OFFSET, 1) != 0
    }

    #[inline]
    pub const fn mark_as_producer(self) -> Self {
        Self(self.0 & !CONSUMER_FLAG)
    }

    #[inline]
    pub const fn mark_as_consumer(self) -> Self {
        Self(self.0 | CONSUMER_FLAG)
    }

    #[inline]
    pub const fn mark_as_waiting(self) -> Self {
        Self(self.0 | WAITING_FLAG)
    }

    #[inline]
    pub const fn clear_waiting(self) -> Self {
        Self(self.0 & !WAITING_FLAG)
    }

    /// Advance the raw word by `SEQUENCE_INCREMENT`.
    ///
    /// Only meaningful on a tag with no flag bits set — tickets come out of
    /// `Reservation::reserve`/`try_reserve` as plain sequence words, and the
    /// role flag is applied afterwards via `mark_as_*`; if that order were
    /// reversed the addition would carry into the flag bits (Design Notes §9
    /// item 2).
    #[inline]
    pub const fn increment(self) -> Self {
        Self(self.0.wrapping_add(SEQUENCE_INCREMENT))
    }

    #[inline]
    pub const fn decrement(self) -> Self {
        Self(self.0.wrapping_sub(SEQUENCE_INCREMENT))
    }

    /// Index into a ring of size `mask + 1` (`mask` must be `capacity - 1`).
    #[inline]
    pub const fn to_index(self, mask: u64) -> usize {
        (self.0 & mask) as usize
    }

    /// The tag this ticket's slot must currently hold for this ticket to be
    /// ready to run (see SPEC_FULL.md §3, invariant 3).
    ///
    /// - A consumer at sequence `s` was preceded by the producer `P(s)`.
    /// - A producer at sequence `s` was preceded by the consumer `C(s - N)`
    ///   (that consumer's completion is what advanced the slot to `s`).
    #[inline]
    pub fn predecessor(self, wrap_delta: u64) -> Self {
        if self.is_consumer() {
            Self((self.0 ^ CONSUMER_FLAG) & !WAITING_FLAG)
        } else {
            Self((self.0.wrapping_sub(wrap_delta) ^ CONSUMER_FLAG) & !WAITING_FLAG)
        }
    }

    /// Does `observed` (the tag currently in the slot) indicate it is this
    /// ticket's turn? The waiting bit is ignored on `observed` — a waiter
    /// may have marked the slot while we were still computing — but never
    /// set on the computed predecessor side, since a predecessor is, by
    /// construction, never itself a waiting tag.
    #[inline]
    pub fn pairs_with(self, observed: Tag, wrap_delta: u64) -> bool {
        self.predecessor(wrap_delta).0 == (observed.0 & !WAITING_FLAG)
    }
}
