//! Driven adapters — concrete implementations of the port traits.
//!
//! This is the only layer that touches real I/O. Everything inside
//! [`crate::app`] stays hardware-agnostic.

pub mod log_sink;
pub mod null;
pub mod serial;
