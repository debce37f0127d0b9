use super::BufferCursor;
use crate::util::error::{BufferError, BufferUnderflow};

/// The parts of a collection which don't depend on its element type.
///
/// This is split from [`Buffer`] so that code which only needs to observe the size of a buffer,
/// such as the guard returned by
/// [`SharedBuffer::lock`](crate::collections::concurrent::SharedBuffer::lock), doesn't need to
/// name an element type.
pub trait Container {
    /// Returns the number of elements in the collection.
    fn len(&self) -> usize;

    /// Returns true if the collection contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements from the collection.
    fn clear(&mut self);
}

/// A collection with a well defined next element, which can be inspected with [`get`] and taken
/// with [`remove`].
///
/// The order in which elements are removed is up to the implementation: insertion order for a
/// [`FifoBuffer`](crate::collections::fifo::FifoBuffer), reverse insertion order for a
/// [`StackBuffer`](crate::collections::stack::StackBuffer) and comparator order for a
/// [`PriorityBuffer`](crate::collections::heap::PriorityBuffer).
///
/// [`get`]: Buffer::get
/// [`remove`]: Buffer::remove
pub trait Buffer<T>: Container {
    type Iter<'a>: Iterator<Item = &'a T> where Self: 'a, T: 'a;

    type Cursor<'a>: BufferCursor<T> where Self: 'a, T: 'a;

    /// Adds a value to the buffer. Implementations without a capacity limit or any validation
    /// always succeed.
    fn add(&mut self, value: T) -> Result<(), BufferError>;

    /// Adds every value produced by `values`, stopping at the first failure.
    fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), BufferError>
    where
        Self: Sized,
    {
        for value in values {
            self.add(value)?;
        }
        Ok(())
    }

    /// Returns a reference to the next element to be removed, without removing it.
    fn get(&self) -> Result<&T, BufferUnderflow>;

    /// Removes and returns the next element.
    fn remove(&mut self) -> Result<T, BufferUnderflow>;

    /// Returns an iterator over all elements, in an order defined by the implementation.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns a cursor over all elements which supports removing the element that was most
    /// recently visited.
    fn cursor(&mut self) -> Self::Cursor<'_>;
}
