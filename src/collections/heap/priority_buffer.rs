use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::slice;

use derive_more::IsVariant;
use tracing::trace;

use super::{Cursor, IntoIter};
use crate::collections::compare::{Comparator, NaturalOrder};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::{BufferError, BufferUnderflow, InvalidArgument};

/// The capacity used by [`PriorityBuffer::new`].
pub const DEFAULT_CAP: usize = 13;

const GROWTH_FACTOR: usize = 2;

/// The direction of a [`PriorityBuffer`], deciding which element is removed first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Order {
    /// The least element according to the comparator is removed first (a min-heap).
    #[default]
    Ascending,
    /// The greatest element according to the comparator is removed first (a max-heap).
    Descending,
}

/// A priority queue implemented as an array-backed binary heap.
///
/// The element returned by [`get`](Buffer::get) and [`remove`](Buffer::remove) is the least
/// element for an [`Ascending`](Order::Ascending) buffer and the greatest for a
/// [`Descending`](Order::Descending) one. Equal elements are removed in no particular order.
///
/// Iteration, both borrowed and owned, visits elements in heap order, which is not sorted order.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the PriorityBuffer.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `peek` | `O(1)` |
/// | `push` | `O(log n)`*, `O(n)` |
/// | `pop` | `O(log n)` |
/// | `clear` | `O(n)` |
/// | cursor `remove` | `O(log n)` |
///
/// \* If the PriorityBuffer is at capacity, `push` will take `O(n)` to double it.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::heap::PriorityBuffer;
/// let mut heap = PriorityBuffer::with_cap(2).unwrap();
/// for i in [5, 3, 8, 1, 4] {
///     heap.push(i);
/// }
/// assert_eq!(heap.cap(), 8);
/// assert_eq!(heap.into_sorted_vec(), [1, 3, 4, 5, 8]);
/// ```
#[derive(Clone)]
pub struct PriorityBuffer<T, C = NaturalOrder> {
    pub(crate) elements: Vec<T>,
    pub(crate) cap: usize,
    pub(crate) order: Order,
    pub(crate) comparator: C,
}

impl<T: Ord> PriorityBuffer<T> {
    /// Creates a new ascending PriorityBuffer using the natural order of `T`, with a capacity of
    /// [`DEFAULT_CAP`].
    pub fn new() -> PriorityBuffer<T> {
        PriorityBuffer::from_parts(DEFAULT_CAP, Order::Ascending, NaturalOrder)
    }

    /// Creates a new ascending PriorityBuffer using the natural order of `T`, which can hold `cap`
    /// elements before growing.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `cap` is 0.
    pub fn with_cap(cap: usize) -> Result<PriorityBuffer<T>, InvalidArgument> {
        PriorityBuffer::with_comparator(cap, Order::Ascending, NaturalOrder)
    }

    /// Creates a new PriorityBuffer with the provided [`Order`], using the natural order of `T`.
    pub fn with_order(order: Order) -> PriorityBuffer<T> {
        PriorityBuffer::from_parts(DEFAULT_CAP, order, NaturalOrder)
    }
}

impl<T, C> PriorityBuffer<T, C> {
    /// Creates a new PriorityBuffer which orders its elements using `comparator`.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `cap` is 0.
    pub fn with_comparator(
        cap: usize,
        order: Order,
        comparator: C,
    ) -> Result<PriorityBuffer<T, C>, InvalidArgument> {
        if cap == 0 {
            return Err(InvalidArgument {
                message: "the capacity of a PriorityBuffer must be greater than 0",
            });
        }

        Ok(PriorityBuffer::from_parts(cap, order, comparator))
    }

    fn from_parts(cap: usize, order: Order, comparator: C) -> PriorityBuffer<T, C> {
        PriorityBuffer {
            elements: Vec::with_capacity(cap),
            cap,
            order,
            comparator,
        }
    }

    /// Returns the number of elements in the PriorityBuffer.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the PriorityBuffer contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements the PriorityBuffer can hold before it has to grow. This
    /// starts at the requested capacity and doubles each time it is reached.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    pub const fn order(&self) -> Order {
        self.order
    }

    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns a reference to the element that would be removed next.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the PriorityBuffer is empty.
    pub fn peek(&self) -> Result<&T, BufferUnderflow> {
        self.elements.first().ok_or(BufferUnderflow)
    }

    /// Removes all elements, replacing the backing storage with a fresh allocation of the same
    /// capacity.
    pub fn clear(&mut self) {
        self.elements = Vec::with_capacity(self.cap);
    }

    /// Returns an iterator over all elements in heap order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    fn grow(&mut self) {
        let new_cap = self.cap.saturating_mul(GROWTH_FACTOR);
        trace!(old_cap = self.cap, new_cap, "growing priority buffer");

        self.elements.reserve_exact(new_cap - self.elements.len());
        self.cap = new_cap;
    }
}

impl<T, C: Comparator<T>> PriorityBuffer<T, C> {
    /// Adds a value to the PriorityBuffer, doubling its capacity first if it is full.
    pub fn push(&mut self, value: T) {
        if self.elements.len() >= self.cap {
            self.grow();
        }

        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
    }

    /// Removes and returns the element at the top of the heap.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the PriorityBuffer is empty.
    pub fn pop(&mut self) -> Result<T, BufferUnderflow> {
        if self.elements.is_empty() {
            return Err(BufferUnderflow);
        }

        let top = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Returns a cursor which visits every element in heap order and can remove them.
    pub fn cursor(&mut self) -> Cursor<'_, T, C> {
        Cursor::new(self)
    }

    /// Consumes the PriorityBuffer, returning its elements in the order they would be removed.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    /// Removes the element at `index` by moving the last element into its place, then repairs the
    /// heap in a single direction.
    pub(crate) fn remove_at(&mut self, index: usize) -> T {
        let removed = self.elements.swap_remove(index);

        if index < self.elements.len() {
            if index > 0 && self.precedes(index, parent(index)) {
                self.sift_up(index);
            } else {
                self.sift_down(index);
            }
        }

        removed
    }

    /// Returns true if the element at `a` must be removed strictly before the element at `b`.
    fn precedes(&self, a: usize, b: usize) -> bool {
        let ordering = self.comparator.compare(&self.elements[a], &self.elements[b]);
        match self.order {
            Order::Ascending => ordering.is_lt(),
            Order::Descending => ordering.is_gt(),
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 && self.precedes(index, parent(index)) {
            self.elements.swap(index, parent(index));
            index = parent(index);
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.elements.len();

        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }

            // The right child wins only if it strictly precedes the left.
            let right = left + 1;
            let child = if right < len && self.precedes(right, left) {
                right
            } else {
                left
            };

            if !self.precedes(child, index) {
                break;
            }

            self.elements.swap(index, child);
            index = child;
        }
    }

    /// Checks the heap-order property for every non-root element.
    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.elements.len()).all(|i| !self.precedes(i, parent(i)))
    }
}

const fn parent(index: usize) -> usize {
    (index - 1) / 2
}

impl<T, C> Container for PriorityBuffer<T, C> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        PriorityBuffer::clear(self);
    }
}

impl<T, C: Comparator<T>> Buffer<T> for PriorityBuffer<T, C> {
    type Iter<'a> = slice::Iter<'a, T> where Self: 'a, T: 'a;

    type Cursor<'a> = Cursor<'a, T, C> where Self: 'a, T: 'a;

    fn add(&mut self, value: T) -> Result<(), BufferError> {
        self.push(value);
        Ok(())
    }

    fn get(&self) -> Result<&T, BufferUnderflow> {
        self.peek()
    }

    fn remove(&mut self) -> Result<T, BufferUnderflow> {
        self.pop()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.elements.iter()
    }

    fn cursor(&mut self) -> Self::Cursor<'_> {
        PriorityBuffer::cursor(self)
    }
}

impl<T: Ord> Default for PriorityBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> Extend<T> for PriorityBuffer<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for PriorityBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let cap = cmp::max(iter.size_hint().0, 1);
        let mut heap = PriorityBuffer::from_parts(cap, Order::Ascending, NaturalOrder);

        heap.extend(iter);
        heap
    }
}

impl<T, C> IntoIterator for PriorityBuffer<T, C> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a PriorityBuffer<T, C> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Debug, C> Debug for PriorityBuffer<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityBuffer")
            .field("contents", &self.elements)
            .field("len", &self.len())
            .field("cap", &self.cap)
            .field("order", &self.order)
            .finish()
    }
}
