use super::PriorityBuffer;
use crate::collections::compare::Comparator;
use crate::collections::traits::{BufferCursor, REMOVE_BEFORE_NEXT};
use crate::util::error::IllegalState;

/// An owned iterator over the elements of a [`PriorityBuffer`], in heap order rather than sorted
/// order. See [`PriorityBuffer::into_sorted_vec`] for the latter.
pub type IntoIter<T> = std::vec::IntoIter<T>;

/// A cursor over a [`PriorityBuffer`] which allows the element most recently visited to be
/// removed. Elements are visited in heap order.
///
/// Removing an element moves the last element of the heap into its slot and repairs the heap from
/// there, either upwards or downwards. The cursor then steps back so that the moved element is
/// visited next. If the repair moves that element towards the root, it is skipped and the parent
/// it displaced is visited a second time.
pub struct Cursor<'a, T, C> {
    pub(crate) heap: &'a mut PriorityBuffer<T, C>,
    pub(crate) index: usize,
    pub(crate) last: Option<usize>,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) const fn new(heap: &'a mut PriorityBuffer<T, C>) -> Cursor<'a, T, C> {
        Cursor {
            heap,
            index: 0,
            last: None,
        }
    }
}

impl<T, C: Comparator<T>> BufferCursor<T> for Cursor<'_, T, C> {
    fn next(&mut self) -> Option<&T> {
        if self.index >= self.heap.len() {
            return None;
        }

        self.last = Some(self.index);
        self.index += 1;
        self.heap.elements.get(self.index - 1)
    }

    fn remove(&mut self) -> Result<T, IllegalState> {
        let index = self.last.take().ok_or(REMOVE_BEFORE_NEXT)?;
        // Revisit the slot, which now holds the element that used to be last.
        self.index = index;
        Ok(self.heap.remove_at(index))
    }
}
