use std::fmt::{self, Debug, Formatter};

use crate::collections::traits::{Buffer, Container};
use crate::util::error::{BufferError, BufferUnderflow, InvalidArgument};

const REJECTED: InvalidArgument = InvalidArgument {
    message: "value rejected by predicate",
};

/// A decorator which only accepts values that match a predicate.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::decorators::PredicatedBuffer;
/// # use buffer_lib::collections::fifo::FifoBuffer;
/// # use buffer_lib::collections::traits::Buffer;
/// let mut evens = PredicatedBuffer::new(FifoBuffer::new(), |v: &u8| v % 2 == 0).unwrap();
/// assert!(evens.add(4).is_ok());
/// assert!(evens.add(5).is_err());
/// ```
pub struct PredicatedBuffer<B, P> {
    inner: B,
    predicate: P,
}

impl<B, P> PredicatedBuffer<B, P> {
    /// Wraps `inner`, checking every element it already contains.
    ///
    /// # Errors
    /// Returns [`InvalidArgument`] if any existing element doesn't match `predicate`.
    pub fn new<T>(inner: B, predicate: P) -> Result<PredicatedBuffer<B, P>, InvalidArgument>
    where
        B: Buffer<T>,
        P: Fn(&T) -> bool,
    {
        if !inner.iter().all(&predicate) {
            return Err(REJECTED);
        }

        Ok(PredicatedBuffer {
            inner,
            predicate,
        })
    }

    pub const fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Container, P> Container for PredicatedBuffer<B, P> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<T, B, P> Buffer<T> for PredicatedBuffer<B, P>
where
    B: Buffer<T>,
    P: Fn(&T) -> bool,
{
    type Iter<'a> = B::Iter<'a> where Self: 'a, T: 'a;

    type Cursor<'a> = B::Cursor<'a> where Self: 'a, T: 'a;

    fn add(&mut self, value: T) -> Result<(), BufferError> {
        if !(self.predicate)(&value) {
            return Err(REJECTED.into());
        }
        self.inner.add(value)
    }

    /// Adds every value, but only once all of them have been checked. Nothing is added if any
    /// value is rejected.
    fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), BufferError> {
        let values: Vec<T> = values.into_iter().collect();
        if !values.iter().all(&self.predicate) {
            return Err(REJECTED.into());
        }
        self.inner.add_all(values)
    }

    fn get(&self) -> Result<&T, BufferUnderflow> {
        self.inner.get()
    }

    fn remove(&mut self) -> Result<T, BufferUnderflow> {
        self.inner.remove()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.inner.iter()
    }

    fn cursor(&mut self) -> Self::Cursor<'_> {
        self.inner.cursor()
    }
}

impl<B: Debug, P> Debug for PredicatedBuffer<B, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PredicatedBuffer").field(&self.inner).finish()
    }
}
