//! A module containing [`PriorityBuffer`] and associated types.
//!
//! Besides the buffer itself, this module provides [`Order`] to choose between a min-heap and a
//! max-heap, [`Cursor`] for iteration with removal and [`IntoIter`] for owned iteration. Borrowed
//! iteration uses [`Iter`](std::slice::Iter) from [`std::slice`].

mod iter;
mod priority_buffer;
mod tests;

pub use iter::*;
pub use priority_buffer::*;
