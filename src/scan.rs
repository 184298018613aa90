//! Scan controller — the Idle/Scanning state machine.
//!
//! ```text
//!  IDLE ──[start]──▶ SCANNING
//!    ▲                  │
//!    └─────[stop]───────┘   (stop also resets the live reading to baseline)
//! ```
//!
//! The controller exclusively owns the scan state and the last-known
//! reading. Transitions are driven by operator commands only, never by
//! sensor data. The History Log is *not* owned here and survives a stop.

use log::info;

use crate::telemetry::Reading;

/// The two operational states of the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Passive: the telemetry source is not polled.
    Idle,
    /// The probe rig is feeding data and the loop is polling.
    Scanning,
}

/// Owns [`ScanState`] and the last-known [`Reading`].
pub struct ScanController {
    state: ScanState,
    last_reading: Reading,
}

impl Default for ScanController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanController {
    /// Starts `Idle` with the baseline reading.
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            last_reading: Reading::BASELINE,
        }
    }

    /// `Idle → Scanning`. Returns `true` if the state changed; `start`
    /// while already `Scanning` is a no-op here (the caller still re-emits
    /// the START command on the wire).
    pub fn start(&mut self) -> bool {
        match self.state {
            ScanState::Idle => {
                info!("scan: Idle -> Scanning");
                self.state = ScanState::Scanning;
                true
            }
            ScanState::Scanning => false,
        }
    }

    /// Any state `→ Idle`, resetting the last-known reading to
    /// [`Reading::BASELINE`]. Returns `true` if the state changed.
    pub fn stop(&mut self) -> bool {
        self.last_reading = Reading::BASELINE;
        match self.state {
            ScanState::Scanning => {
                info!("scan: Scanning -> Idle, live reading reset to baseline");
                self.state = ScanState::Idle;
                true
            }
            ScanState::Idle => false,
        }
    }

    /// Record a freshly validated reading as the last-known one.
    pub fn record(&mut self, reading: Reading) {
        self.last_reading = reading;
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ScanState::Scanning
    }

    /// The last-known reading (baseline until the first valid line after a
    /// start, and again after every stop).
    pub fn last_reading(&self) -> Reading {
        self.last_reading
    }
}
