use std::fmt::{self, Debug, Formatter};

use super::{Cursor, IntoIter, Iter};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::{BufferError, BufferUnderflow};

/// A last-in first-out buffer.
///
/// [`get`](Buffer::get) and [`remove`](Buffer::remove) operate on the most recently added
/// element, while iteration runs from the bottom of the stack (the oldest element) to the top.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::stack::StackBuffer;
/// let mut stack: StackBuffer<_> = ["a", "b", "c"].into_iter().collect();
/// assert_eq!(stack.peek(), Ok(&"c"));
/// assert_eq!(stack.peek_n(2), Ok(&"a"));
/// assert_eq!(stack.search(&"a"), Some(3));
/// assert_eq!(stack.pop(), Ok("c"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StackBuffer<T> {
    pub(crate) elements: Vec<T>,
}

impl<T> StackBuffer<T> {
    pub const fn new() -> StackBuffer<T> {
        StackBuffer {
            elements: Vec::new(),
        }
    }

    pub fn with_cap(cap: usize) -> StackBuffer<T> {
        StackBuffer {
            elements: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pushes `value` onto the top of the stack.
    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    /// Returns a reference to the element on top of the stack.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the stack is empty.
    pub fn peek(&self) -> Result<&T, BufferUnderflow> {
        self.elements.last().ok_or(BufferUnderflow)
    }

    /// Returns a reference to the element `n` places below the top of the stack, where `n = 0` is
    /// the top itself.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the stack has `n` or fewer elements.
    pub fn peek_n(&self, n: usize) -> Result<&T, BufferUnderflow> {
        self.elements
            .len()
            .checked_sub(n + 1)
            .and_then(|index| self.elements.get(index))
            .ok_or(BufferUnderflow)
    }

    /// Pops the element on top of the stack.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T, BufferUnderflow> {
        self.elements.pop().ok_or(BufferUnderflow)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns an iterator from the bottom of the stack to the top.
    pub fn iter(&self) -> Iter<'_, T> {
        self.elements.iter()
    }

    pub const fn cursor(&mut self) -> Cursor<'_, T> {
        Cursor::new(self)
    }
}

impl<T: PartialEq> StackBuffer<T> {
    /// Returns the 1-based distance from the top of the stack to the topmost element equal to
    /// `value`, so the top itself is at distance 1.
    pub fn search(&self, value: &T) -> Option<usize> {
        self.elements
            .iter()
            .rev()
            .position(|item| item == value)
            .map(|index| index + 1)
    }
}

impl<T> Container for StackBuffer<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<T> Buffer<T> for StackBuffer<T> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    type Cursor<'a> = Cursor<'a, T> where Self: 'a, T: 'a;

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
        Cursor::new(self)
    }
}

impl<T> Default for StackBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for StackBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> FromIterator<T> for StackBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        StackBuffer {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for StackBuffer<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<T: Debug> Debug for StackBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}
