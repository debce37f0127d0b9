use std::iter;
use std::time::{Duration, Instant};

use super::{BufferGuard, BufferLock, LockGuard};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::BufferError;

/// How long a blocking layer may wait during a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Use the timeout configured on each layer, if it has one.
    Configured,
    /// Give up at the provided instant.
    At(Instant),
    /// Wait for as long as it takes.
    Unbounded,
}

impl Deadline {
    /// Creates a deadline `timeout` from now. A timeout too large to represent never expires.
    pub fn after(timeout: Duration) -> Deadline {
        Instant::now()
            .checked_add(timeout)
            .map_or(Deadline::Unbounded, Deadline::At)
    }
}

/// A buffer which can be shared between threads, implemented by each of the decorators in this
/// module.
///
/// Each decorator layers its own policy over the one it wraps, while every layer shares a single
/// [`BufferLock`]. Every operation acquires that lock once and holds it for its whole duration,
/// except while waiting, when it is released.
///
/// The `*_locked` methods are the hooks each layer implements; callers should use the provided
/// methods instead.
pub trait SharedBuffer {
    type Inner: Container;

    /// Returns the lock shared by every layer around the underlying buffer.
    fn buffer_lock(&self) -> &BufferLock<Self::Inner>;

    #[doc(hidden)]
    fn add_locked<T, I>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        values: I,
    ) -> Result<(), BufferError>
    where
        Self::Inner: Buffer<T>,
        I: ExactSizeIterator<Item = T>;

    #[doc(hidden)]
    fn get_locked<T: Clone>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>;

    #[doc(hidden)]
    fn remove_locked<T>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>;

    /// Adds a value to the buffer, possibly waiting for space if a bounded layer is present.
    ///
    /// # Errors
    /// Returns any error produced by the buffer or one of the layers wrapping it.
    fn add<T>(&self, value: T) -> Result<(), BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        let mut state = self.buffer_lock().acquire();
        self.add_locked(&mut state, iter::once(value))
    }

    /// Adds every value as a single operation. A bounded layer waits until there is space for all
    /// of them at once.
    ///
    /// # Errors
    /// Returns any error produced by the buffer or one of the layers wrapping it. Values added
    /// before an error produced by the underlying buffer are kept.
    fn add_all<T, I>(&self, values: I) -> Result<(), BufferError>
    where
        Self::Inner: Buffer<T>,
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut state = self.buffer_lock().acquire();
        self.add_locked(&mut state, values.into_iter())
    }

    /// Returns a clone of the next element, without removing it. Blocking layers wait for as long
    /// as they're configured to.
    ///
    /// # Errors
    /// Returns [`BufferUnderflow`](crate::util::error::BufferUnderflow) if the buffer is empty
    /// once any wait is over, or [`WaitInterrupted`](crate::util::error::WaitInterrupted) if a
    /// wait was interrupted.
    fn get<T: Clone>(&self) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        let mut state = self.buffer_lock().acquire();
        self.get_locked(&mut state, Deadline::Configured)
    }

    /// Like [`get`](SharedBuffer::get), but waits for at most `timeout` in total, regardless of
    /// how each layer is configured.
    ///
    /// # Errors
    /// See [`get`](SharedBuffer::get).
    fn get_timeout<T: Clone>(&self, timeout: Duration) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        let deadline = Deadline::after(timeout);
        let mut state = self.buffer_lock().acquire();
        self.get_locked(&mut state, deadline)
    }

    /// Removes and returns the next element. Blocking layers wait for as long as they're
    /// configured to.
    ///
    /// # Errors
    /// See [`get`](SharedBuffer::get).
    fn remove<T>(&self) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        let mut state = self.buffer_lock().acquire();
        self.remove_locked(&mut state, Deadline::Configured)
    }

    /// Like [`remove`](SharedBuffer::remove), but waits for at most `timeout` in total.
    ///
    /// # Errors
    /// See [`get`](SharedBuffer::get).
    fn remove_timeout<T>(&self, timeout: Duration) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        let deadline = Deadline::after(timeout);
        let mut state = self.buffer_lock().acquire();
        self.remove_locked(&mut state, deadline)
    }

    fn len(&self) -> usize {
        self.buffer_lock().acquire().buffer.len()
    }

    fn is_empty(&self) -> bool {
        self.buffer_lock().acquire().buffer.is_empty()
    }

    /// Removes every element, waking any thread waiting for space.
    fn clear(&self) {
        let lock = self.buffer_lock();
        lock.acquire().buffer.clear();
        lock.notify_all();
    }

    /// Locks the buffer for a compound operation, such as iterating or removing elements with a
    /// cursor. Every other operation on the buffer blocks until the guard is dropped.
    fn lock(&self) -> BufferGuard<'_, Self::Inner> {
        BufferGuard::new(self.buffer_lock())
    }

    /// Causes every thread currently waiting on the buffer to give up with
    /// [`WaitInterrupted`](crate::util::error::WaitInterrupted). Threads that start waiting
    /// afterwards are unaffected.
    fn interrupt(&self) {
        self.buffer_lock().interrupt();
    }
}
