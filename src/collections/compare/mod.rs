//! Ordering strategies for ordered buffers.
//!
//! A [`Comparator`] is anything that can compare two borrowed values, including plain closures of
//! the form `Fn(&T, &T) -> Ordering`. The types in this module are small combinators which build
//! new comparators out of existing ones.
//!
//! [`Ordering`]: std::cmp::Ordering

mod comparator;
mod fixed_order;

pub use comparator::*;
pub use fixed_order::*;
