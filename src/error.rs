//! Error types for theta-queue.
//!
//! The queue has no fallible runtime operations (`push`/`pop` cannot fail,
//! `try_push`/`try_pop` signal fullness/emptiness by value, not by error) —
//! this type exists purely for the one misuse it does detect, construction
//! with an invalid capacity, which a `const N` can't rule out at the type
//! level (see DESIGN.md).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl QueueError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }
}
