use std::time::{Duration, Instant};

use derive_more::IsVariant;
use tracing::{debug, trace};

use super::{BufferLock, Deadline, LockGuard, SharedBuffer, SynchronizedBuffer, WaitError};
use crate::collections::traits::{Buffer, Container};
use crate::util::error::{BufferError, BufferOverflow, InvalidArgument, OverflowKind, WaitInterrupted};

/// What a [`BoundedBuffer`] does when an add would take it past its maximum size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum WaitPolicy {
    /// Fail immediately with [`OverflowKind::Full`].
    #[default]
    Never,
    /// Wait up to the provided duration for space, then fail with [`OverflowKind::TimedOut`].
    Timeout(Duration),
    /// Wait until there is space, or until interrupted.
    Forever,
}

/// A decorator which limits the number of elements in the buffer it wraps.
///
/// Adds that would take the buffer past `max_size` either fail or wait for other threads to remove
/// elements, according to the layer's [`WaitPolicy`]. Every removal through this layer wakes any
/// thread waiting for space.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::concurrent::{BoundedBuffer, SharedBuffer};
/// # use buffer_lib::collections::fifo::FifoBuffer;
/// let buffer = BoundedBuffer::decorate(FifoBuffer::new(), 1).unwrap();
///
/// assert!(buffer.add("x").is_ok());
/// assert!(buffer.add("y").unwrap_err().is_overflow());
/// assert_eq!(buffer.remove(), Ok("x"));
/// assert!(buffer.add("y").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BoundedBuffer<S> {
    inner: S,
    max_size: usize,
    wait: WaitPolicy,
}

impl<B: Container> BoundedBuffer<SynchronizedBuffer<B>> {
    /// Wraps `buffer` in a [`SynchronizedBuffer`] and a `BoundedBuffer` which never waits.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn decorate(
        buffer: B,
        max_size: usize,
    ) -> Result<BoundedBuffer<SynchronizedBuffer<B>>, InvalidArgument> {
        BoundedBuffer::new(SynchronizedBuffer::new(buffer), max_size)
    }
}

impl<S: SharedBuffer> BoundedBuffer<S> {
    /// Creates a layer which fails immediately when full.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn new(inner: S, max_size: usize) -> Result<BoundedBuffer<S>, InvalidArgument> {
        BoundedBuffer::with_wait(inner, max_size, WaitPolicy::Never)
    }

    /// Creates a layer which waits for up to `timeout` when full.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn with_timeout(
        inner: S,
        max_size: usize,
        timeout: Duration,
    ) -> Result<BoundedBuffer<S>, InvalidArgument> {
        BoundedBuffer::with_wait(inner, max_size, WaitPolicy::Timeout(timeout))
    }

    /// # Errors
    /// Returns [`InvalidArgument`] if `max_size` is 0.
    pub fn with_wait(
        inner: S,
        max_size: usize,
        wait: WaitPolicy,
    ) -> Result<BoundedBuffer<S>, InvalidArgument> {
        if max_size == 0 {
            return Err(InvalidArgument {
                message: "the maximum size of a BoundedBuffer must be greater than 0",
            });
        }

        Ok(BoundedBuffer {
            inner,
            max_size,
            wait,
        })
    }

    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    pub const fn wait_policy(&self) -> WaitPolicy {
        self.wait
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_size
    }

    /// Returns the number of elements that can currently be added without waiting.
    pub fn remaining_capacity(&self) -> usize {
        self.max_size.saturating_sub(self.len())
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn overflow(&self, kind: OverflowKind) -> BufferError {
        BufferOverflow {
            max_size: self.max_size,
            kind,
        }
        .into()
    }

    fn wait_for_space(
        &self,
        state: &mut LockGuard<'_, S::Inner>,
        additions: usize,
    ) -> Result<(), BufferError> {
        let max_size = self.max_size;
        if additions > max_size {
            debug!(max_size, additions, "add can never fit in bounded buffer");
            return Err(self.overflow(OverflowKind::TooLarge));
        }

        let blocked = |buffer: &S::Inner| buffer.len() + additions > max_size;
        if !blocked(&state.buffer) {
            return Ok(());
        }

        let deadline = match self.wait {
            WaitPolicy::Never => {
                debug!(max_size, additions, "bounded buffer is full");
                return Err(self.overflow(OverflowKind::Full));
            }
            WaitPolicy::Timeout(timeout) => Instant::now().checked_add(timeout),
            WaitPolicy::Forever => None,
        };

        trace!(max_size, additions, "waiting for space in bounded buffer");
        self.buffer_lock()
            .wait_while(state, deadline, blocked)
            .map_err(|err| match err {
                WaitError::TimedOut => self.overflow(OverflowKind::TimedOut),
                WaitError::Interrupted => WaitInterrupted.into(),
            })
    }
}

impl<S: SharedBuffer> SharedBuffer for BoundedBuffer<S> {
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
        self.wait_for_space(state, values.len())?;
        self.inner.add_locked(state, values)
    }

    fn get_locked<T: Clone>(
        &self,
        state: &mut LockGuard<'_, Self::Inner>,
        deadline: Deadline,
    ) -> Result<T, BufferError>
    where
        Self::Inner: Buffer<T>,
    {
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
        let removed = self.inner.remove_locked(state, deadline)?;
        trace!(len = state.buffer.len(), "waking bounded buffer producers");
        self.buffer_lock().notify_all();
        Ok(removed)
    }
}
