//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SiloGuard system: scan
//! orchestration, risk scoring, history logging, and actuation policy. All
//! interaction with the probe rig happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real hardware.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
