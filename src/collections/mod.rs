//! Buffer types, the traits they share and the decorators that wrap them.
//!
//! # Method
//! Every concrete buffer implements [`Buffer`](traits::Buffer), which is also implemented by the
//! single-threaded decorators in [`decorators`]. The thread-safe decorators in [`concurrent`] own
//! their buffer behind a lock instead, so they expose the same operations through
//! [`SharedBuffer`](concurrent::SharedBuffer) with `&self` receivers.

#[cfg(feature = "compare")]
pub mod compare;
#[cfg(feature = "concurrent")]
pub mod concurrent;
#[cfg(feature = "decorators")]
pub mod decorators;
#[cfg(feature = "fifo")]
pub mod fifo;
#[cfg(feature = "heap")]
pub mod heap;
#[cfg(feature = "stack")]
pub mod stack;
pub mod traits;
