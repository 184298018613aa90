//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger. A future dashboard feed would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | depth={:.0}mm | T={:.1}\u{00b0}C | \
                     moisture={:.1}% | voc={:.0} | combustion={}% health={}% ({:?}) | \
                     eta={:.1}h | alarm={} | predictor={}",
                    t.state,
                    t.reading.depth_mm,
                    t.reading.temperature_c,
                    t.reading.moisture_pct,
                    t.reading.voc,
                    t.combustion_risk,
                    t.worker_health_risk,
                    t.health_advisory,
                    t.time_to_incident_hours,
                    if t.alarm_engaged { "ON" } else { "off" },
                    if t.predictor_ok { "ok" } else { "FALLBACK" },
                );
            }
            AppEvent::ScanStateChanged { from, to } => {
                info!("SCAN  | {:?} -> {:?}", from, to);
            }
            AppEvent::AlarmChanged {
                engaged,
                combustion_risk,
            } => {
                if *engaged {
                    warn!("ALARM | engaged at combustion risk {}%", combustion_risk);
                } else {
                    info!("ALARM | cleared at combustion risk {}%", combustion_risk);
                }
            }
            AppEvent::RecordLogged {
                depth_mm,
                total_records,
            } => {
                info!(
                    "LOG   | station {:.0}mm recorded ({} total)",
                    depth_mm, total_records
                );
            }
            AppEvent::PredictorFallback => {
                warn!("RISK  | predictor unavailable, combustion risk reported as 0");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
