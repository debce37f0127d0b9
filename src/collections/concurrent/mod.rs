//! Thread-safe decorators which own a buffer behind a single lock.
//!
//! # Method
//! Every decorator here is a cheap, cloneable handle onto one [`BufferLock`]: a mutex guarding the
//! buffer and a condition variable used to wake waiting threads. The decorators layer on top of
//! each other, so a [`BoundedBuffer`] wrapping a [`BlockingBuffer`] wrapping a
//! [`SynchronizedBuffer`] checks capacity and emptiness under the same lock and waits on the same
//! condition variable.
//!
//! ```
//! # use std::thread;
//! # use buffer_lib::collections::concurrent::{BlockingBuffer, BoundedBuffer, SharedBuffer};
//! # use buffer_lib::collections::heap::PriorityBuffer;
//! let queue = BoundedBuffer::new(BlockingBuffer::decorate(PriorityBuffer::new()), 4).unwrap();
//!
//! let consumer = {
//!     let queue = queue.clone();
//!     thread::spawn(move || queue.remove())
//! };
//!
//! queue.add(7_u32).unwrap();
//! assert_eq!(consumer.join().unwrap(), Ok(7));
//! ```
//!
//! # Fairness
//! None of the decorators make any guarantee about the order in which blocked threads are woken.
//! When an element becomes available, any waiting thread may be the one to take it.

mod blocking;
mod bounded;
mod lock;
mod shared_buffer;
mod synchronized;
mod tests;

pub use blocking::*;
pub use bounded::*;
pub use lock::*;
pub use shared_buffer::*;
pub use synchronized::*;
