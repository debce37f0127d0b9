use super::StackBuffer;
use crate::collections::traits::{BufferCursor, REMOVE_BEFORE_NEXT};
use crate::util::error::IllegalState;

#[doc(inline)]
pub use std::slice::Iter;
#[doc(inline)]
pub use std::vec::IntoIter;

/// A cursor over a [`StackBuffer`], from the bottom of the stack to the top, which can remove the
/// element it last returned.
pub struct Cursor<'a, T> {
    pub(crate) stack: &'a mut StackBuffer<T>,
    pub(crate) index: usize,
    pub(crate) last: Option<usize>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) const fn new(stack: &'a mut StackBuffer<T>) -> Cursor<'a, T> {
        Cursor {
            stack,
            index: 0,
            last: None,
        }
    }
}

impl<T> BufferCursor<T> for Cursor<'_, T> {
    fn next(&mut self) -> Option<&T> {
        let index = self.index;
        let value = self.stack.elements.get(index)?;
        self.last = Some(index);
        self.index += 1;
        Some(value)
    }

    fn remove(&mut self) -> Result<T, IllegalState> {
        let index = self.last.take().ok_or(REMOVE_BEFORE_NEXT)?;
        self.index = index;
        Ok(self.stack.elements.remove(index))
    }
}
