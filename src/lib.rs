//! Fixed-capacity queues that keep the most recently inserted elements.
//!
//! Inserting into a full queue never blocks and never fails: the oldest
//! element is evicted to make room.
//!
//! - [`RingBuffer`] is the single-threaded core.
//! - [`ConcurrentQueue`] serializes calls to a ring behind a mutex.
//! - [`BlockingQueue`] adds consumers that wait, with or without a timeout,
//!   plus bulk draining and async adapters.

mod blocking;
mod concurrent;
pub mod error;
mod loom;
mod ring;

pub use crate::blocking::wrapper::{QueueSink, QueueStream};
pub use crate::blocking::{BlockingQueue, DrainTarget, Interrupt, QueueId};
pub use crate::concurrent::ConcurrentQueue;
pub use crate::ring::{Drain, IntoIter, Iter, RingBuffer};
