//! Inbound commands to the application service.
//!
//! These represent actions requested by the operator-facing surface (stdin,
//! a future RPC layer) that the
//! [`MonitorService`](super::service::MonitorService) interprets and acts
//! upon. Commands are applied between ticks, never mid-tick.

use crate::config::SystemConfig;

/// Commands that external surfaces can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Begin a scan: signal the rig to start feeding telemetry and start
    /// polling.
    StartScan,

    /// Stop the scan: reset the rig to a known-safe state, reset the live
    /// reading to baseline, and stop polling. The history log is untouched.
    StopScan,

    /// Hot-reload configuration (thresholds, advisory bands).
    UpdateConfig(SystemConfig),
}
