//! `theta-queue`: a bounded, lock-free, multi-producer/multi-consumer queue
//! for transferring small `Copy` values between threads.
//!
//! The ring is a fixed, compile-time power-of-two array of slots. Each slot
//! carries a tagged word that acts as both the commit point for a published
//! value and the pairing token a waiting thread blocks on — there is no
//! mutex and no condition variable anywhere in the hot path; threads that
//! would otherwise spin park via a futex-style wait/wake primitive instead.
//!
//! ```
//! use theta_queue::MpmcQueue;
//!
//! let q: MpmcQueue<u64, 4> = MpmcQueue::new();
//! q.push(1);
//! q.push(2);
//! assert_eq!(q.pop(), 1);
//! assert_eq!(q.pop(), 2);
//! ```
//!
//! See `README.md` for the wait/wake protocol in more detail, and
//! `DESIGN.md` for where each piece of this crate is grounded.

pub mod constants;
pub mod error;
pub mod insights;
pub mod metrics;
mod packed;
mod park;
mod queue;
mod reservation;
mod slot;
mod tag;

pub use error::{QueueError, Result};
pub use metrics::{Metrics, MetricsSnapshot, METRICS};
pub use queue::{MpmcQueue, QueueOpts};
