//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them — log to the console, feed a
//! dashboard, etc.

use crate::risk::HealthAdvisory;
use crate::scan::ScanState;
use crate::telemetry::Reading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A reading was accepted and scored this tick.
    Telemetry(TelemetrySnapshot),

    /// The scan controller transitioned between states.
    ScanStateChanged { from: ScanState, to: ScanState },

    /// The alarm actuation level flipped (the command itself is resent
    /// every cycle; this fires only on the transition).
    AlarmChanged { engaged: bool, combustion_risk: u8 },

    /// A record made it past depth deduplication into the history log.
    RecordLogged { depth_mm: f32, total_records: usize },

    /// The predictor was unavailable; combustion risk is the 0 reporting
    /// fallback, not a safety statement.
    PredictorFallback,

    /// The application service has started (carries initial state).
    Started(ScanState),
}

/// A point-in-time snapshot suitable for logging or a dashboard feed.
#[derive(Debug, Clone)]
pub struct TelemetrySnapshot {
    pub state: ScanState,
    pub reading: Reading,
    pub combustion_risk: u8,
    pub worker_health_risk: u8,
    pub health_advisory: HealthAdvisory,
    pub time_to_incident_hours: f32,
    pub alarm_engaged: bool,
    pub predictor_ok: bool,
}
