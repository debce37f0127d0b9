//! A module containing [`StackBuffer`] and associated types.

mod iter;
mod stack_buffer;

pub use iter::*;
pub use stack_buffer::*;
