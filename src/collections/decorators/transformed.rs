use std::fmt::{self, Debug, Formatter};

use crate::collections::traits::{Buffer, BufferCursor, Container};
use crate::util::error::{BufferError, BufferUnderflow};

/// A decorator which maps every value added to it before passing it on to the inner buffer.
///
/// Values already in the inner buffer are left alone by [`new`](TransformedBuffer::new) and
/// mapped by [`transforming`](TransformedBuffer::transforming).
///
/// # Examples
/// ```
/// # use buffer_lib::collections::decorators::TransformedBuffer;
/// # use buffer_lib::collections::stack::StackBuffer;
/// # use buffer_lib::collections::traits::Buffer;
/// let mut upper = TransformedBuffer::new(StackBuffer::new(), |s: String| s.to_uppercase());
/// upper.add("shout".to_string()).unwrap();
/// assert_eq!(upper.get().unwrap(), "SHOUT");
/// ```
pub struct TransformedBuffer<B, F> {
    inner: B,
    transform: F,
}

impl<B, F> TransformedBuffer<B, F> {
    /// Wraps `inner` without touching the elements it already contains.
    pub const fn new(inner: B, transform: F) -> TransformedBuffer<B, F> {
        TransformedBuffer {
            inner,
            transform,
        }
    }

    /// Wraps `inner`, first replacing every element it contains with its transformed value. The
    /// elements are re-added in the order the inner buffer's cursor visits them.
    ///
    /// # Errors
    /// Returns any error the inner buffer produces while re-adding the transformed elements.
    pub fn transforming<T>(mut inner: B, transform: F) -> Result<TransformedBuffer<B, F>, BufferError>
    where
        B: Buffer<T>,
        F: Fn(T) -> T,
    {
        let mut existing = Vec::with_capacity(inner.len());
        let mut cursor = inner.cursor();
        while cursor.next().is_some() {
            existing.push(cursor.remove()?);
        }
        drop(cursor);

        for value in existing {
            inner.add(transform(value))?;
        }

        Ok(TransformedBuffer::new(inner, transform))
    }

    pub const fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Container, F> Container for TransformedBuffer<B, F> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<T, B, F> Buffer<T> for TransformedBuffer<B, F>
where
    B: Buffer<T>,
    F: Fn(T) -> T,
{
    type Iter<'a> = B::Iter<'a> where Self: 'a, T: 'a;

    type Cursor<'a> = B::Cursor<'a> where Self: 'a, T: 'a;

    fn add(&mut self, value: T) -> Result<(), BufferError> {
        self.inner.add((self.transform)(value))
    }

    fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), BufferError> {
        let transform = &self.transform;
        self.inner.add_all(values.into_iter().map(transform))
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

impl<B: Debug, F> Debug for TransformedBuffer<B, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransformedBuffer").field(&self.inner).finish()
    }
}
