//! Single-threaded decorators which add a policy to any [`Buffer`](crate::collections::traits::Buffer)
//! while implementing `Buffer` themselves.
//!
//! For thread-safe decorators, see [`concurrent`](crate::collections::concurrent).

mod predicated;
mod transformed;

pub use predicated::*;
pub use transformed::*;
