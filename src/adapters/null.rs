//! Offline adapter for running without a probe rig attached.
//!
//! The daemon stays useful with no device: the control loop keeps ticking,
//! every poll reports the source as unavailable, and actuator commands are
//! logged and dropped.

use log::debug;

use crate::app::ports::{ActuatorPort, TelemetryPort};
use crate::error::TelemetryError;
use crate::telemetry::{ActuatorCommand, RawLine};

/// A link that is permanently absent.
pub struct NullLink;

impl TelemetryPort for NullLink {
    fn poll_line(&mut self) -> Result<Option<RawLine>, TelemetryError> {
        Err(TelemetryError::SourceUnavailable)
    }
}

impl ActuatorPort for NullLink {
    fn send(&mut self, command: ActuatorCommand) {
        debug!("no rig attached, dropping command {:?}", command);
    }
}
