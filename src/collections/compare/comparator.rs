use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

/// A total order over values of type `T`, supplied to ordered collections such as
/// [`PriorityBuffer`](crate::collections::heap::PriorityBuffer).
///
/// Any closure of the form `Fn(&T, &T) -> Ordering` is a Comparator. Combinators are provided by
/// [`ComparatorExt`].
pub trait Comparator<T: ?Sized> {
    /// Compares two values, returning their relative [`Ordering`].
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Combinators for building new Comparators out of existing ones.
///
/// Implemented for every type. The compared type is only fixed once the resulting Comparator is
/// used.
///
/// # Examples
/// ```
/// # use std::cmp::Ordering;
/// # use buffer_lib::collections::compare::{Comparator, ComparatorExt, NaturalOrder};
/// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
/// let cmp = by_len.then(NaturalOrder).reversed();
/// assert_eq!(cmp.compare(&"ab", &"b"), Ordering::Less);
/// assert_eq!(cmp.compare(&"ab", &"ac"), Ordering::Greater);
/// ```
pub trait ComparatorExt: Sized {
    /// Creates a Comparator which imposes the opposite order to this one.
    fn reversed(self) -> Reversed<Self> {
        Reversed(self)
    }

    /// Creates a Comparator which breaks ties in this one using `next`.
    fn then<C>(self, next: C) -> Chained<Self, C> {
        Chained(self, next)
    }
}

impl<C> ComparatorExt for C {}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Comparator<T> for F {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The natural order of a type, as defined by its [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// A Comparator which reverses the order of the one it wraps. See [`ComparatorExt::reversed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// A Comparator which consults its second Comparator only when the first considers two values
/// equal. See [`ComparatorExt::then`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Chained<A, B>(pub A, pub B);

impl<T: ?Sized, A: Comparator<T>, B: Comparator<T>> Comparator<T> for Chained<A, B> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(a, b).then_with(|| self.1.compare(a, b))
    }
}

/// A Comparator which orders values by a key extracted from each of them.
pub struct ByKey<F, K, C = NaturalOrder> {
    key: F,
    comparator: C,
    _phantom: PhantomData<fn() -> K>,
}

/// Orders values by the natural order of the key returned by `key`.
///
/// # Examples
/// ```
/// # use std::cmp::Ordering;
/// # use buffer_lib::collections::compare::{by_key, Comparator};
/// let cmp = by_key(|s: &String| s.len());
/// assert_eq!(cmp.compare(&"abc".to_string(), &"z".to_string()), Ordering::Greater);
/// ```
pub fn by_key<T, K: Ord, F: Fn(&T) -> K>(key: F) -> ByKey<F, K> {
    by_key_with(key, NaturalOrder)
}

/// Orders values by the key returned by `key`, using `comparator` to order the keys.
pub fn by_key_with<T, K, F, C>(key: F, comparator: C) -> ByKey<F, K, C>
where
    F: Fn(&T) -> K,
    C: Comparator<K>,
{
    ByKey {
        key,
        comparator,
        _phantom: PhantomData,
    }
}

impl<T, K, F, C> Comparator<T> for ByKey<F, K, C>
where
    F: Fn(&T) -> K,
    C: Comparator<K>,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.comparator.compare(&(self.key)(a), &(self.key)(b))
    }
}

impl<F: Clone, K, C: Clone> Clone for ByKey<F, K, C> {
    fn clone(&self) -> Self {
        ByKey {
            key: self.key.clone(),
            comparator: self.comparator.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<F, K, C: Debug> Debug for ByKey<F, K, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey")
            .field("comparator", &self.comparator)
            .finish_non_exhaustive()
    }
}

/// A Comparator over [`Option`]s which places [`None`] before every [`Some`], ordering the rest
/// with the wrapped Comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullsFirst<C>(pub C);

impl<T, C: Comparator<T>> Comparator<Option<T>> for NullsFirst<C> {
    fn compare(&self, a: &Option<T>, b: &Option<T>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => self.0.compare(a, b),
        }
    }
}

/// A Comparator over [`Option`]s which places [`None`] after every [`Some`], ordering the rest
/// with the wrapped Comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullsLast<C>(pub C);

impl<T, C: Comparator<T>> Comparator<Option<T>> for NullsLast<C> {
    fn compare(&self, a: &Option<T>, b: &Option<T>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => self.0.compare(a, b),
        }
    }
}

/// Returns the lesser of two values according to `comparator`, preferring `a` when they're equal.
pub fn min_by<'a, T: ?Sized, C: Comparator<T>>(a: &'a T, b: &'a T, comparator: &C) -> &'a T {
    match comparator.compare(a, b) {
        Ordering::Greater => b,
        _ => a,
    }
}

/// Returns the greater of two values according to `comparator`, preferring `b` when they're
/// equal.
pub fn max_by<'a, T: ?Sized, C: Comparator<T>>(a: &'a T, b: &'a T, comparator: &C) -> &'a T {
    match comparator.compare(a, b) {
        Ordering::Greater => a,
        _ => b,
    }
}
