//! A module containing [`FifoBuffer`] and associated types.
//!
//! [`Cursor`] provides iteration with removal, from oldest to newest. Borrowed and owned iteration
//! are re-exports of [`std::collections::vec_deque`]'s iterators.

mod fifo_buffer;
mod iter;

pub use fifo_buffer::*;
pub use iter::*;
