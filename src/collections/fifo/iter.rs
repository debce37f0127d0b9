use super::FifoBuffer;
use crate::collections::traits::{BufferCursor, REMOVE_BEFORE_NEXT};
use crate::util::error::IllegalState;

#[doc(inline)]
pub use std::collections::vec_deque::{IntoIter, Iter};

/// A cursor over a [`FifoBuffer`], from the oldest element to the newest, which can remove the
/// element it last returned.
pub struct Cursor<'a, T> {
    pub(crate) fifo: &'a mut FifoBuffer<T>,
    pub(crate) index: usize,
    pub(crate) last: Option<usize>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) const fn new(fifo: &'a mut FifoBuffer<T>) -> Cursor<'a, T> {
        Cursor {
            fifo,
            index: 0,
            last: None,
        }
    }
}

impl<T> BufferCursor<T> for Cursor<'_, T> {
    fn next(&mut self) -> Option<&T> {
        let index = self.index;
        if index >= self.fifo.len() {
            return None;
        }

        self.last = Some(index);
        self.index += 1;
        self.fifo.elements.get(index)
    }

    fn remove(&mut self) -> Result<T, IllegalState> {
        let index = self.last.take().ok_or(REMOVE_BEFORE_NEXT)?;
        // Everything after index shifts down by one.
        self.index = index;
        self.fifo.elements.remove(index).ok_or(REMOVE_BEFORE_NEXT)
    }
}
