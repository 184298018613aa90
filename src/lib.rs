//! SiloGuard monitor library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All serial I/O lives behind the port traits in
//! [`app::ports`]; the concrete adapters are in [`adapters`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod history;
pub mod risk;
pub mod scan;
pub mod telemetry;

pub mod adapters;
