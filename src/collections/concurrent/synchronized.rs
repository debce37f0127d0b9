use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::{BufferLock, Deadline, LockGuard, SharedBuffer};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::BufferError;

/// The innermost concurrent layer, which owns a buffer behind a [`BufferLock`] and makes every
/// operation on it atomic.
///
/// A `SynchronizedBuffer` never waits. Removing from an empty buffer fails immediately with
/// [`BufferUnderflow`](crate::util::error::BufferUnderflow), whatever timeout is requested.
///
/// Cloning produces another handle to the same buffer.
///
/// # Examples
/// ```
/// # use std::thread;
/// # use buffer_lib::collections::concurrent::{SharedBuffer, SynchronizedBuffer};
/// # use buffer_lib::collections::stack::StackBuffer;
/// let shared = SynchronizedBuffer::new(StackBuffer::new());
///
/// let workers: Vec<_> = (0..4)
///     .map(|i| {
///         let shared = shared.clone();
///         thread::spawn(move || shared.add(i))
///     })
///     .collect();
/// for worker in workers {
///     worker.join().unwrap().unwrap();
/// }
///
/// assert_eq!(shared.len(), 4);
/// ```
pub struct SynchronizedBuffer<B> {
    lock: Arc<BufferLock<B>>,
}

impl<B: Container> SynchronizedBuffer<B> {
    pub fn new(buffer: B) -> SynchronizedBuffer<B> {
        SynchronizedBuffer {
            lock: Arc::new(BufferLock::new(buffer)),
        }
    }

    /// Returns the underlying buffer if this is the only remaining handle to it, or gives the
    /// handle back otherwise.
    ///
    /// # Errors
    /// Returns `self` if any other handle to the buffer is still alive.
    pub fn try_into_inner(self) -> Result<B, SynchronizedBuffer<B>> {
        Arc::try_unwrap(self.lock)
            .map(BufferLock::into_buffer)
            .map_err(|lock| SynchronizedBuffer { lock })
    }
}

impl<B: Container> SharedBuffer for SynchronizedBuffer<B> {
    type Inner = B;

    fn buffer_lock(&self) -> &BufferLock<B> {
        &self.lock
    }

    fn add_locked<T, I>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        values: I,
    ) -> Result<(), BufferError>
    where
        Self::Inner: Buffer<T>,
        I: ExactSizeIterator<Item = T>,
    {
        state.buffer.add_all(values)
    }

    fn get_locked<T: Clone>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        _deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        Ok(state.buffer.get()?.clone())
    }

    fn remove_locked<T>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        _deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        Ok(state.buffer.remove()?)
    }
}

impl<B> Clone for SynchronizedBuffer<B> {
    fn clone(&self) -> Self {
        SynchronizedBuffer {
            lock: Arc::clone(&self.lock),
        }
    }
}

impl<B: Debug> Debug for SynchronizedBuffer<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SynchronizedBuffer").field(&self.lock).finish()
    }
}
