//! A collections library built around the [`Buffer`](collections::traits::Buffer) abstraction: a
//! collection with a well defined "next" element that can be inspected with `get` and taken with
//! `remove`.
//!
//! # Purpose
//! The interesting part of this crate is the pairing of a binary heap
//! ([`PriorityBuffer`](collections::heap::PriorityBuffer)) with a stack of thread-safe decorators
//! ([`SynchronizedBuffer`](collections::concurrent::SynchronizedBuffer),
//! [`BlockingBuffer`](collections::concurrent::BlockingBuffer) and
//! [`BoundedBuffer`](collections::concurrent::BoundedBuffer)) which turn any buffer into a
//! capacity-limited, blocking queue that can be shared between threads.
//!
//! Simpler buffers ([`FifoBuffer`](collections::fifo::FifoBuffer) and
//! [`StackBuffer`](collections::stack::StackBuffer)), single-threaded decorators and a set of
//! [`Comparator`](collections::compare::Comparator) combinators round things out.
//!
//! # Error Handling
//! Operations which can fail for reasons outside of the caller's control return [`Result`]s with
//! small, strongly typed errors from the [`error`] module. Each error is its own struct
//! implementing [`Error`](std::error::Error), and [`BufferError`](error::BufferError) combines
//! them for operations that can fail in more than one way.
//!
//! An empty buffer is an error rather than a [`None`], because for the blocking decorators
//! "nothing arrived in time" is the same condition as "nothing was there".
//!
//! # Logging
//! Waits, timeouts and overflows are reported through [`tracing`] at `trace` and `debug` level.
//! This crate never installs a subscriber.
//!
//! # Dependencies
//! Derive macros from `derive_more` remove the repetitive parts of the error types.
//! `parking_lot` provides the mutex and condition variable behind the concurrent decorators.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;

pub use util::error;
