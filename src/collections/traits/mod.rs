//! Traits shared by every buffer in this crate.

mod buffer;
mod cursor;

pub use buffer::*;
pub use cursor::*;
