use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// The buffer contained no elements when one was requested, or no element became available before
/// a blocking wait expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferUnderflow;

impl Display for BufferUnderflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer is empty!")
    }
}

impl Error for BufferUnderflow {}

/// The reason that a [`BufferOverflow`] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum OverflowKind {
    /// The buffer was full and the caller asked not to wait.
    Full,
    /// The buffer stayed full until the wait deadline passed.
    TimedOut,
    /// The number of values being added exceeds the maximum size on its own.
    TooLarge,
}

/// An addition would have taken a buffer past its maximum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOverflow {
    pub max_size: usize,
    pub kind: OverflowKind,
}

impl Display for BufferOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            OverflowKind::Full => write!(f, "Buffer is full! (max size {})", self.max_size),
            OverflowKind::TimedOut => write!(
                f,
                "Timeout expired waiting for space in buffer with max size {}!",
                self.max_size
            ),
            OverflowKind::TooLarge => write!(f, "Buffer size cannot exceed {}!", self.max_size),
        }
    }
}

impl Error for BufferOverflow {}

/// A constructor parameter or an added value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid argument: {message}")]
pub struct InvalidArgument {
    pub message: &'static str,
}

/// A cursor was asked to do something that its current position doesn't allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Illegal state: {message}")]
pub struct IllegalState {
    pub message: &'static str,
}

/// A thread waiting on a shared buffer was woken by
/// [`SharedBuffer::interrupt`](crate::collections::concurrent::SharedBuffer::interrupt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitInterrupted;

impl Display for WaitInterrupted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Wait on buffer was interrupted!")
    }
}

impl Error for WaitInterrupted {}

/// Any error produced by a buffer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum BufferError {
    Underflow(BufferUnderflow),
    Overflow(BufferOverflow),
    InvalidArgument(InvalidArgument),
    IllegalState(IllegalState),
    Interrupted(WaitInterrupted),
}
