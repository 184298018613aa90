//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (the serial link, event sinks) implement these traits.
//! The [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches a serial port directly. The
//! telemetry source and actuator channel are one shared duplex resource, so
//! a concrete link adapter implements both [`TelemetryPort`] and
//! [`ActuatorPort`]; only the control loop may drive it.

use crate::error::TelemetryError;
use crate::telemetry::{ActuatorCommand, RawLine};

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: probe rig → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick to obtain the
/// freshest complete telemetry line.
pub trait TelemetryPort {
    /// Non-blocking, latest-wins poll.
    ///
    /// - `Ok(Some(line))` — the newest complete line buffered since the last
    ///   poll; older buffered lines in the same tick have been discarded.
    /// - `Ok(None)` — no complete line available this tick.
    /// - `Err(SourceUnavailable)` — the link is absent or disconnected.
    ///
    /// Implementations must never block the control loop: reads are bounded
    /// by a short timeout and a fixed-capacity buffer.
    fn poll_line(&mut self) -> Result<Option<RawLine>, TelemetryError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → probe rig)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commands the rig through this.
///
/// Pure side effect — the core consumes no return value. Implementations
/// log write failures and move on; the level-driven actuation policy resends
/// the current command every cycle anyway.
pub trait ActuatorPort {
    fn send(&mut self, command: ActuatorCommand);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (structured log, a
/// dashboard feed, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
