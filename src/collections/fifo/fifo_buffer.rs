use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};

use derive_more::IsVariant;
use tracing::trace;

use super::{Cursor, IntoIter, Iter};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::{BufferError, BufferOverflow, BufferUnderflow, InvalidArgument, OverflowKind};

/// What a FifoBuffer with a maximum size does when a value is added while it is full.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum WhenFull {
    /// The addition fails with a [`BufferOverflow`].
    #[default]
    Reject,
    /// The oldest element is discarded to make room.
    EvictOldest,
}

/// A first-in first-out buffer, backed by a ring buffer.
///
/// A FifoBuffer is either unbounded, or has a maximum size which is enforced according to a
/// [`WhenFull`] policy: [`bounded`](FifoBuffer::bounded) buffers reject additions while full and
/// [`circular`](FifoBuffer::circular) buffers replace their oldest element.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `peek` | `O(1)` |
/// | cursor `remove` | `O(n)` |
///
/// \* Growing an unbounded FifoBuffer takes `O(n)`.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::fifo::FifoBuffer;
/// let mut fifo = FifoBuffer::circular(2).unwrap();
/// fifo.push('a').unwrap();
/// fifo.push('b').unwrap();
/// assert_eq!(fifo.push('c'), Ok(Some('a')));
/// assert_eq!(fifo.pop(), Ok('b'));
/// ```
#[derive(Clone)]
pub struct FifoBuffer<T> {
    pub(crate) elements: VecDeque<T>,
    pub(crate) max_size: Option<usize>,
    pub(crate) when_full: WhenFull,
}

impl<T> FifoBuffer<T> {
    /// Creates a new, unbounded FifoBuffer. Memory is allocated when the first value is added.
    pub const fn new() -> FifoBuffer<T> {
        FifoBuffer {
            elements: VecDeque::new(),
            max_size: None,
            when_full: WhenFull::Reject,
        }
    }

    /// Creates a new, unbounded FifoBuffer with room for `cap` elements before it grows.
    pub fn with_cap(cap: usize) -> FifoBuffer<T> {
        FifoBuffer {
            elements: VecDeque::with_capacity(cap),
            max_size: None,
            when_full: WhenFull::Reject,
        }
    }

    /// Creates a FifoBuffer which holds at most `max_size` elements and rejects additions beyond
    /// that.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn bounded(max_size: usize) -> Result<FifoBuffer<T>, InvalidArgument> {
        FifoBuffer::with_max_size(max_size, WhenFull::Reject)
    }

    /// Creates a FifoBuffer which holds at most `max_size` elements, discarding the oldest element
    /// to make room for each addition beyond that.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn circular(max_size: usize) -> Result<FifoBuffer<T>, InvalidArgument> {
        FifoBuffer::with_max_size(max_size, WhenFull::EvictOldest)
    }

    /// Creates a FifoBuffer which holds at most `max_size` elements, with the provided policy.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn with_max_size(
        max_size: usize,
        when_full: WhenFull,
    ) -> Result<FifoBuffer<T>, InvalidArgument> {
        if max_size == 0 {
            return Err(InvalidArgument {
                message: "the maximum size of a FifoBuffer must be greater than 0",
            });
        }

        Ok(FifoBuffer {
            elements: VecDeque::with_capacity(max_size),
            max_size: Some(max_size),
            when_full,
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the maximum size of the FifoBuffer, or [`None`] if it is unbounded.
    pub const fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub const fn when_full(&self) -> WhenFull {
        self.when_full
    }

    /// Returns true if the FifoBuffer has a maximum size and has reached it.
    pub fn is_full(&self) -> bool {
        self.max_size.is_some_and(|max| self.elements.len() >= max)
    }

    /// Adds `value` as the newest element. If the FifoBuffer is circular and full, the oldest
    /// element is removed and returned.
    ///
    /// # Errors
    /// Returns [`BufferOverflow`] if the FifoBuffer is bounded and full.
    pub fn push(&mut self, value: T) -> Result<Option<T>, BufferOverflow> {
        let mut evicted = None;

        if let Some(max_size) = self.max_size
            && self.elements.len() >= max_size
        {
            match self.when_full {
                WhenFull::Reject => {
                    return Err(BufferOverflow {
                        max_size,
                        kind: OverflowKind::Full,
                    });
                }
                WhenFull::EvictOldest => {
                    trace!(max_size, "evicting oldest element from circular buffer");
                    evicted = self.elements.pop_front();
                }
            }
        }

        self.elements.push_back(value);
        Ok(evicted)
    }

    /// Returns a reference to the oldest element.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the FifoBuffer is empty.
    pub fn peek(&self) -> Result<&T, BufferUnderflow> {
        self.elements.front().ok_or(BufferUnderflow)
    }

    /// Removes and returns the oldest element.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`] if the FifoBuffer is empty.
    pub fn pop(&mut self) -> Result<T, BufferUnderflow> {
        self.elements.pop_front().ok_or(BufferUnderflow)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns an iterator from the oldest element to the newest.
    pub fn iter(&self) -> Iter<'_, T> {
        self.elements.iter()
    }

    pub const fn cursor(&mut self) -> Cursor<'_, T> {
        Cursor::new(self)
    }
}

impl<T> Container for FifoBuffer<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<T> Buffer<T> for FifoBuffer<T> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    type Cursor<'a> = Cursor<'a, T> where Self: 'a, T: 'a;

    fn add(&mut self, value: T) -> Result<(), BufferError> {
        self.push(value)?;
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

impl<T> Default for FifoBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for FifoBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FifoBuffer {
            elements: iter.into_iter().collect(),
            max_size: None,
            when_full: WhenFull::Reject,
        }
    }
}

impl<T> IntoIterator for FifoBuffer<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FifoBuffer<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: PartialEq> PartialEq for FifoBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq> Eq for FifoBuffer<T> {}

impl<T: Debug> Debug for FifoBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoBuffer")
            .field("contents", &self.elements)
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}
