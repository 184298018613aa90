//! Application service — the hexagonal core.
//!
//! [`MonitorService`] owns the scan controller, risk engine, and history
//! log. It exposes a clean, hardware-agnostic API. All I/O flows through
//! port traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!  TelemetryPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                    │       MonitorService         │
//!   ActuatorPort ◀── │  Scan · Risk · History       │
//!                    └─────────────────────────────┘
//! ```
//!
//! One `tick` is one poll-compute-act cycle: drain the freshest telemetry
//! line, parse and validate it, score it, append to the history (dedup by
//! depth), and command the alarm level. No condition in the tick is fatal —
//! the design favours availability of the loop over strict correctness of
//! any single tick.

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::history::{HistoryLog, LogRecord};
use crate::risk::{HealthAdvisory, Predictor, RiskEngine};
use crate::scan::{ScanController, ScanState};
use crate::telemetry::{ActuatorCommand, Reading};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetrySnapshot};
use super::ports::{ActuatorPort, EventSink, TelemetryPort};

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct MonitorService<P: Predictor> {
    scan: ScanController,
    engine: RiskEngine<P>,
    history: HistoryLog,
    config: SystemConfig,
    tick_count: u64,
    /// Alarm level as last commanded; `None` before the first command.
    alarm_engaged: Option<bool>,
}

impl<P: Predictor> MonitorService<P> {
    /// Construct the service from configuration and a predictor.
    pub fn new(config: SystemConfig, predictor: P) -> Self {
        Self {
            scan: ScanController::new(),
            engine: RiskEngine::new(predictor),
            history: HistoryLog::new(),
            config,
            tick_count: 0,
            alarm_engaged: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup in the initial (Idle) state.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.scan.state()));
        info!("MonitorService started in {:?}", self.scan.state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll-compute-act cycle.
    ///
    /// The `link` parameter satisfies **both** [`TelemetryPort`] and
    /// [`ActuatorPort`] — the rig is a single duplex resource, and this
    /// keeps the port boundary explicit without a double mutable borrow.
    ///
    /// Passive while `Idle`: the telemetry source is not polled and no
    /// actuator command is sent.
    pub fn tick(
        &mut self,
        link: &mut (impl TelemetryPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        if !self.scan.is_scanning() {
            return;
        }

        // 1. Drain the freshest complete line (latest wins).
        let line = match link.poll_line() {
            Ok(Some(line)) => line,
            // No fresh line this tick: keep reporting the last-known
            // reading, force no actuator change. The next tick retries.
            Ok(None) => return,
            Err(e) => {
                debug!("telemetry source: {e}");
                return;
            }
        };

        // 2. Parse and validate. Malformed lines are silently discarded and
        // never touch the last-known reading.
        let reading = match Reading::parse(&line) {
            Ok(r) => r,
            Err(e) => {
                debug!("discarding line {:?}: {e}", line.as_str());
                return;
            }
        };
        self.scan.record(reading);

        // 3. Score.
        let assessment = self.engine.assess(&reading);
        if !assessment.predictor_ok {
            sink.emit(&AppEvent::PredictorFallback);
        }

        // 4. History append, deduplicated by depth station.
        if self.history.append(LogRecord::new(reading, &assessment)) {
            sink.emit(&AppEvent::RecordLogged {
                depth_mm: reading.depth_mm,
                total_records: self.history.len(),
            });
        }

        // 5. Actuate. Level-driven: the current command is sent on every
        // successful cycle, not just on threshold crossings — idempotent
        // resends are expected and harmless.
        let engaged = assessment.combustion_risk > self.config.alarm_threshold_pct;
        link.send(if engaged {
            ActuatorCommand::AlarmOn
        } else {
            ActuatorCommand::AlarmOff
        });
        if self.alarm_engaged != Some(engaged) {
            sink.emit(&AppEvent::AlarmChanged {
                engaged,
                combustion_risk: assessment.combustion_risk,
            });
            self.alarm_engaged = Some(engaged);
        }

        // 6. Publish the snapshot for the presentation layer.
        sink.emit(&AppEvent::Telemetry(TelemetrySnapshot {
            state: self.scan.state(),
            reading,
            combustion_risk: assessment.combustion_risk,
            worker_health_risk: assessment.worker_health_risk,
            health_advisory: HealthAdvisory::classify(
                assessment.worker_health_risk,
                self.config.health_warn_pct,
                self.config.health_danger_pct,
            ),
            time_to_incident_hours: assessment.time_to_incident_hours,
            alarm_engaged: engaged,
            predictor_ok: assessment.predictor_ok,
        }));
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command.
    ///
    /// The caller guarantees commands are applied between ticks, never
    /// interleaved with one.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        link: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::StartScan => {
                // START goes on the wire even when already scanning.
                link.send(ActuatorCommand::StartScan);
                if self.scan.start() {
                    sink.emit(&AppEvent::ScanStateChanged {
                        from: ScanState::Idle,
                        to: ScanState::Scanning,
                    });
                } else {
                    info!("start while scanning: START re-emitted, no transition");
                }
            }
            AppCommand::StopScan => {
                // Stop must always leave the rig in a known-safe state,
                // regardless of the last computed risk.
                link.send(ActuatorCommand::StopReset);
                link.send(ActuatorCommand::AlarmOff);
                self.alarm_engaged = Some(false);
                if self.scan.stop() {
                    sink.emit(&AppEvent::ScanStateChanged {
                        from: ScanState::Scanning,
                        to: ScanState::Idle,
                    });
                }
            }
            AppCommand::UpdateConfig(new_config) => match new_config.validate() {
                Ok(()) => {
                    self.config = new_config;
                    info!("configuration updated at runtime");
                }
                Err(msg) => warn!("rejected config update: {msg}"),
            },
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current scan state.
    pub fn state(&self) -> ScanState {
        self.scan.state()
    }

    /// The last-known reading (baseline when idle or before the first
    /// valid line).
    pub fn last_reading(&self) -> Reading {
        self.scan.last_reading()
    }

    /// The session's scan history.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }
}
