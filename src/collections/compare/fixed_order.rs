use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use derive_more::IsVariant;

use super::Comparator;

/// Where a [`FixedOrder`] places values which weren't part of the order it was created with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Unknown {
    /// Unknown values compare less than all known values.
    Before,
    /// Unknown values compare greater than all known values.
    #[default]
    After,
}

/// A Comparator which orders values by their position in a list supplied up front.
///
/// Values which appear more than once in the list keep their first position. Two unknown values
/// are considered equal.
///
/// # Examples
/// ```
/// # use std::cmp::Ordering;
/// # use buffer_lib::collections::compare::{Comparator, FixedOrder, Unknown};
/// let planets = FixedOrder::new(["mercury", "venus", "earth"], Unknown::After);
/// assert_eq!(planets.compare(&"venus", &"mercury"), Ordering::Greater);
/// assert_eq!(planets.compare(&"pluto", &"earth"), Ordering::Greater);
/// ```
#[derive(Debug, Clone)]
pub struct FixedOrder<T: Hash + Eq> {
    ranks: HashMap<T, usize>,
    unknown: Unknown,
}

impl<T: Hash + Eq> FixedOrder<T> {
    /// Creates a FixedOrder which ranks values by the order they're produced by `order`.
    pub fn new<I: IntoIterator<Item = T>>(order: I, unknown: Unknown) -> FixedOrder<T> {
        let mut ranks = HashMap::new();
        for (rank, value) in order.into_iter().enumerate() {
            ranks.entry(value).or_insert(rank);
        }

        FixedOrder {
            ranks,
            unknown,
        }
    }

    /// Returns the position of `value` in the order, if it has one.
    pub fn rank(&self, value: &T) -> Option<usize> {
        self.ranks.get(value).copied()
    }

    /// Returns true if `value` was part of the order.
    pub fn is_known(&self, value: &T) -> bool {
        self.ranks.contains_key(value)
    }

    pub const fn unknown(&self) -> Unknown {
        self.unknown
    }
}

impl<T: Hash + Eq> Comparator<T> for FixedOrder<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match self.unknown {
                Unknown::Before => Ordering::Less,
                Unknown::After => Ordering::Greater,
            },
            (Some(_), None) => match self.unknown {
                Unknown::Before => Ordering::Greater,
                Unknown::After => Ordering::Less,
            },
        }
    }
}
