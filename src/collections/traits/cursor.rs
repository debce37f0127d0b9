use crate::util::error::IllegalState;

/// A lending iterator over a [`Buffer`](super::Buffer) that can remove the element it last
/// returned.
///
/// Only one structural change is allowed per step: calling [`remove`](BufferCursor::remove) before
/// the first call to [`next`](BufferCursor::next), or twice without a `next` in between, fails
/// with [`IllegalState`].
///
/// # Examples
/// ```
/// # use buffer_lib::collections::fifo::FifoBuffer;
/// # use buffer_lib::collections::traits::{Buffer, BufferCursor, Container};
/// let mut fifo: FifoBuffer<u8> = (1..=6).collect();
/// let mut cursor = fifo.cursor();
/// while let Some(value) = cursor.next() {
///     let even = *value % 2 == 0;
///     if even {
///         cursor.remove().unwrap();
///     }
/// }
/// assert_eq!(fifo.len(), 3);
/// assert_eq!(fifo.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
/// ```
pub trait BufferCursor<T> {
    /// Advances the cursor, returning the next element if there is one.
    fn next(&mut self) -> Option<&T>;

    /// Removes the element most recently returned by [`next`](BufferCursor::next).
    fn remove(&mut self) -> Result<T, IllegalState>;
}

pub(crate) const REMOVE_BEFORE_NEXT: IllegalState = IllegalState {
    message: "remove() called before next() or twice for the same element",
};
