use std::time::{Duration, Instant};

use tracing::trace;

use super::{BufferLock, Deadline, LockGuard, SharedBuffer, SynchronizedBuffer, WaitError};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::{BufferError, BufferUnderflow, WaitInterrupted};

/// A decorator which makes [`get`](SharedBuffer::get) and [`remove`](SharedBuffer::remove) wait
/// for an element to become available, rather than failing on an empty buffer.
///
/// Without a timeout, waits last until an element is added or the wait is
/// [interrupted](SharedBuffer::interrupt). With one, an empty buffer at the deadline produces
/// [`BufferUnderflow`]. Every add through this layer wakes all waiting threads.
///
/// # Examples
/// ```
/// # use std::thread;
/// # use std::time::Duration;
/// # use buffer_lib::collections::concurrent::{BlockingBuffer, SharedBuffer};
/// # use buffer_lib::collections::fifo::FifoBuffer;
/// let jobs = BlockingBuffer::decorate(FifoBuffer::new());
///
/// let worker = {
///     let jobs = jobs.clone();
///     thread::spawn(move || (jobs.remove(), jobs.remove_timeout(Duration::from_millis(10))))
/// };
///
/// jobs.add("compile").unwrap();
/// let (first, second) = worker.join().unwrap();
/// assert_eq!(first, Ok("compile"));
/// assert!(second.unwrap_err().is_underflow());
/// ```
#[derive(Debug, Clone)]
pub struct BlockingBuffer<S> {
    inner: S,
    timeout: Option<Duration>,
}

impl<B: Container> BlockingBuffer<SynchronizedBuffer<B>> {
    /// Wraps `buffer` in a [`SynchronizedBuffer`] and a `BlockingBuffer` without a timeout.
    pub fn decorate(buffer: B) -> BlockingBuffer<SynchronizedBuffer<B>> {
        BlockingBuffer::new(SynchronizedBuffer::new(buffer))
    }
}

impl<S: SharedBuffer> BlockingBuffer<S> {
    /// Creates a layer which waits indefinitely.
    pub const fn new(inner: S) -> BlockingBuffer<S> {
        BlockingBuffer {
            inner,
            timeout: None,
        }
    }

    /// Creates a layer which waits for at most `timeout` when no deadline is given to a call.
    pub const fn with_timeout(inner: S, timeout: Duration) -> BlockingBuffer<S> {
        BlockingBuffer {
            inner,
            timeout: Some(timeout),
        }
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn wait_for_element(
        &self,
        state: &mut LockGuard<'_, S::Inner>,
        deadline: Deadline,
    ) -> Result<(), BufferError> {
        let deadline = match deadline {
            Deadline::Configured => self.timeout.and_then(|timeout| Instant::now().checked_add(timeout)),
            Deadline::At(instant) => Some(instant),
            Deadline::Unbounded => None,
        };

        self.buffer_lock()
            .wait_while(state, deadline, |buffer| buffer.is_empty())
            .map_err(|err| match err {
                WaitError::TimedOut => BufferUnderflow.into(),
                WaitError::Interrupted => WaitInterrupted.into(),
            })
    }
}

impl<S: SharedBuffer> SharedBuffer for BlockingBuffer<S> {
    type Inner = S::Inner;

    fn buffer_lock(&self) -> &BufferLock<Self::Inner> {
        self.inner.buffer_lock()
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
        let result = self.inner.add_locked(state, values);
        trace!(len = state.buffer.len(), "waking buffer consumers");
        self.buffer_lock().notify_all();
        result
    }

    fn get_locked<T: Clone>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        self.wait_for_element(state, deadline)?;
        self.inner.get_locked(state, deadline)
    }

    fn remove_locked<T>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
        self.wait_for_element(state, deadline)?;
        self.inner.remove_locked(state, deadline)
    }
}
