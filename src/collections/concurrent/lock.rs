use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, DerefMut};
use std::time::Instant;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::collections::traits::Container;

/// The state protected by a [`BufferLock`].
pub struct Guarded<B> {
    pub(crate) buffer: B,
    /// Bumped by every interrupt. A waiter that sees it change gives up.
    pub(crate) interrupts: u64,
}

/// The raw guard held while a [`BufferLock`] is locked.
pub type LockGuard<'a, B> = MutexGuard<'a, Guarded<B>>;

/// A buffer behind a mutex, paired with the condition variable that every decorator sharing the
/// buffer waits on.
pub struct BufferLock<B> {
    state: Mutex<Guarded<B>>,
    signal: Condvar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitError {
    TimedOut,
    Interrupted,
}

impl<B> BufferLock<B> {
    pub(crate) fn new(buffer: B) -> BufferLock<B> {
        BufferLock {
            state: Mutex::new(Guarded {
                buffer,
                interrupts: 0,
            }),
            signal: Condvar::new(),
        }
    }

    pub(crate) fn acquire(&self) -> LockGuard<'_, B> {
        self.state.lock()
    }

    pub(crate) fn notify_all(&self) {
        self.signal.notify_all();
    }

    /// Waits on the condition variable for as long as `blocked` holds for the buffer, rechecking
    /// after every wake. The lock is released while waiting.
    ///
    /// `deadline` is fixed by the caller; [`None`] waits indefinitely.
    pub(crate) fn wait_while<F>(
        &self,
        state: &mut LockGuard<'_, B>,
        deadline: Option<Instant>,
        mut blocked: F,
    ) -> Result<(), WaitError>
    where
        F: FnMut(&B) -> bool,
    {
        let epoch = state.interrupts;

        loop {
            if !blocked(&state.buffer) {
                return Ok(());
            }

            if state.interrupts != epoch {
                debug!("wait on buffer interrupted");
                return Err(WaitError::Interrupted);
            }

            match deadline {
                None => {
                    trace!("waiting on buffer");
                    self.signal.wait(state);
                }
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        debug!("wait on buffer timed out");
                        return Err(WaitError::TimedOut);
                    }

                    trace!(?deadline, "waiting on buffer");
                    self.signal.wait_until(state, deadline);
                }
            }
        }
    }

    /// Wakes every thread currently waiting on this lock, causing each of them to fail.
    pub(crate) fn interrupt(&self) {
        let mut state = self.acquire();
        state.interrupts = state.interrupts.wrapping_add(1);
        debug!(epoch = state.interrupts, "interrupting buffer waiters");
        drop(state);

        self.signal.notify_all();
    }

    /// Consumes the lock, returning the buffer.
    pub(crate) fn into_buffer(self) -> B {
        self.state.into_inner().buffer
    }
}

impl<B: Debug> Debug for BufferLock<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("BufferLock");
        match self.state.try_lock() {
            Some(state) => debug.field("buffer", &state.buffer),
            None => debug.field("buffer", &format_args!("<locked>")),
        };
        debug.finish()
    }
}

/// A locked buffer, returned by [`SharedBuffer::lock`](super::SharedBuffer::lock).
///
/// The guard dereferences to the buffer, allowing any operation on it including iteration and
/// cursor removal. If the length of the buffer changed while the guard was held, every waiting
/// thread is woken when it is dropped.
///
/// Operations made through the guard bypass the policies of the decorators, so a guard can take a
/// [`BoundedBuffer`](super::BoundedBuffer) past its maximum size.
pub struct BufferGuard<'a, B: Container> {
    state: LockGuard<'a, B>,
    lock: &'a BufferLock<B>,
    len: usize,
}

impl<'a, B: Container> BufferGuard<'a, B> {
    pub(crate) fn new(lock: &'a BufferLock<B>) -> BufferGuard<'a, B> {
        let state = lock.acquire();
        let len = state.buffer.len();

        BufferGuard {
            state,
            lock,
            len,
        }
    }
}

impl<B: Container> Deref for BufferGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        &self.state.buffer
    }
}

impl<B: Container> DerefMut for BufferGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state.buffer
    }
}

impl<B: Container> Drop for BufferGuard<'_, B> {
    fn drop(&mut self) {
        if self.state.buffer.len() != self.len {
            self.lock.notify_all();
        }
    }
}
