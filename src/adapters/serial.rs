//! Serial link adapter — the duplex connection to the probe rig.
//!
//! Implements [`TelemetryPort`] (non-blocking, latest-wins line polling)
//! and [`ActuatorPort`] (single-byte command writes) over one
//! [`serialport`] handle. Only the control loop holds this adapter; there
//! is no concurrent access.

use std::io::{Read, Write};
use std::time::Duration;

use anyhow::Context;
use log::{debug, info, warn};

use crate::app::ports::{ActuatorPort, TelemetryPort};
use crate::error::TelemetryError;
use crate::telemetry::{extract_latest_line, ActuatorCommand, RawLine, RxBuffer};

/// Duplex serial adapter for the probe rig.
pub struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
    /// Bytes read off the wire that have not yet formed a complete line.
    rx: RxBuffer,
}

impl SerialLink {
    /// Open the named port. The short timeout bounds every read so a quiet
    /// or disconnected rig can never stall the control loop.
    pub fn open(port_name: &str, baud_rate: u32, read_timeout: Duration) -> anyhow::Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(read_timeout)
            .flow_control(serialport::FlowControl::None)
            .open()
            .with_context(|| format!("opening serial port {port_name}"))?;
        info!("serial link open on {port_name} at {baud_rate} baud");
        Ok(Self {
            port,
            rx: RxBuffer::new(),
        })
    }

    /// First USB serial port on the system, if any (auto-detect fallback
    /// when no port is configured).
    pub fn detect_port() -> Option<String> {
        let ports = serialport::available_ports().ok()?;
        ports
            .into_iter()
            .find(|p| matches!(p.port_type, serialport::SerialPortType::UsbPort(_)))
            .map(|p| p.port_name)
    }

    /// Drain whatever the rig has sent since the last poll into `self.rx`.
    fn drain_available(&mut self) -> Result<(), TelemetryError> {
        loop {
            let pending = self
                .port
                .bytes_to_read()
                .map_err(|_| TelemetryError::SourceUnavailable)?;
            if pending == 0 {
                return Ok(());
            }

            let mut chunk = [0u8; 64];
            let want = chunk.len().min(pending as usize);
            match self.port.read(&mut chunk[..want]) {
                Ok(0) => return Ok(()),
                Ok(n) => {
                    for &b in &chunk[..n] {
                        if self.rx.push(b).is_err() {
                            // Accumulator full without a newline: garbage
                            // flood. Drop it and start over.
                            debug!("rx buffer overflow, discarding {} bytes", self.rx.len());
                            self.rx.clear();
                            let _ = self.rx.push(b);
                        }
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => return Ok(()),
                Err(e) => {
                    debug!("serial read failed: {e}");
                    return Err(TelemetryError::SourceUnavailable);
                }
            }
        }
    }
}

impl TelemetryPort for SerialLink {
    fn poll_line(&mut self) -> Result<Option<RawLine>, TelemetryError> {
        self.drain_available()?;
        Ok(extract_latest_line(&mut self.rx))
    }
}

impl ActuatorPort for SerialLink {
    fn send(&mut self, command: ActuatorCommand) {
        // Fire and forget: the level-driven policy resends every cycle, so a
        // dropped byte heals on the next tick.
        if let Err(e) = self.port.write_all(&[command.wire_byte()]) {
            warn!("actuator write {:?} failed: {e}", command);
        }
    }
}
