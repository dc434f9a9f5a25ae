//! Queue protocol constants.
//!
//! These mirror the `theta::Tag` constants of the original source
//! (`kIncrement`, `kBufferSizeMask`, `kConsumerFlag`, `kWaitingFlag`) but are
//! expressed as free functions of `N` rather than template parameters, since
//! `N` is a `const` generic on `MpmcQueue` rather than compiled per-instance.

/// Default ring buffer capacity when a caller doesn't pick one explicitly.
pub const DEFAULT_CAPACITY: usize = 128;

/// Step by which ticket counters advance on every reservation.
pub const SEQUENCE_INCREMENT: u64 = 1;

/// Bit 63 of a tag: 0 = producer tag, 1 = consumer tag.
pub const CONSUMER_FLAG: u64 = 1 << 63;

/// Bit 62 of a tag: a waiter has published intent to sleep on this slot.
pub const WAITING_FLAG: u64 = 1 << 62;

/// Mask selecting the 62-bit sequence field (everything but the two flag
/// bits at the top of the word).
pub const SEQUENCE_MASK: u64 = !(CONSUMER_FLAG | WAITING_FLAG);
