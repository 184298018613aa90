//! Append-only scan history, deduplicated by probe depth.
//!
//! A new record is appended only when its depth differs from the depth of
//! the most recently appended record. This models "the probe moved to a new
//! station", not "the reading changed" — equal-depth records with different
//! sensor values are still suppressed. The log is insertion-ordered,
//! in-memory, and lives for the session; it is never cleared by a scan stop.

use serde::Serialize;

use crate::risk::RiskAssessment;
use crate::telemetry::Reading;

/// One history entry: the reading plus the two risk scores derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogRecord {
    #[serde(flatten)]
    pub reading: Reading,
    pub combustion_risk: u8,
    pub worker_health_risk: u8,
}

impl LogRecord {
    pub fn new(reading: Reading, assessment: &RiskAssessment) -> Self {
        Self {
            reading,
            combustion_risk: assessment.combustion_risk,
            worker_health_risk: assessment.worker_health_risk,
        }
    }
}

/// The append-only, depth-deduplicated scan history.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<LogRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append `record` unless its depth equals the depth of the last entry.
    /// Returns `true` if the record was retained.
    pub fn append(&mut self, record: LogRecord) -> bool {
        if let Some(last) = self.records.last() {
            if last.reading.depth_mm == record.reading.depth_mm {
                return false;
            }
        }
        self.records.push(record);
        true
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the log as CSV for the presentation layer.
    pub fn to_csv(&self) -> String {
        let mut out =
            String::from("depth,temperature,moisture,voc,combustion_risk,worker_health_risk\n");
        for r in &self.records {
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                r.reading.depth_mm,
                r.reading.temperature_c,
                r.reading.moisture_pct,
                r.reading.voc,
                r.combustion_risk,
                r.worker_health_risk
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: f32, temp: f32) -> LogRecord {
        LogRecord {
            reading: Reading {
                depth_mm: depth,
                temperature_c: temp,
                moisture_pct: 10.0,
                voc: 100.0,
            },
            combustion_risk: 5,
            worker_health_risk: 8,
        }
    }

    #[test]
    fn first_record_always_appends() {
        let mut log = HistoryLog::new();
        assert!(log.append(record(0.0, 25.0)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn equal_depth_back_to_back_keeps_only_first() {
        let mut log = HistoryLog::new();
        assert!(log.append(record(15.0, 25.0)));
        // Same station, different temperature — still suppressed.
        assert!(!log.append(record(15.0, 40.0)));
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].reading.temperature_c, 25.0);
    }

    #[test]
    fn different_depth_always_appends() {
        let mut log = HistoryLog::new();
        log.append(record(15.0, 25.0));
        log.append(record(15.0, 26.0));
        assert!(log.append(record(30.0, 25.0)));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn revisiting_a_station_later_is_allowed() {
        // Dedup is adjacent-only: 15 -> 30 -> 15 keeps all three.
        let mut log = HistoryLog::new();
        assert!(log.append(record(15.0, 25.0)));
        assert!(log.append(record(30.0, 25.0)));
        assert!(log.append(record(15.0, 25.0)));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut log = HistoryLog::new();
        for depth in [0.0, 15.0, 30.0, 45.0] {
            log.append(record(depth, 25.0));
        }
        let depths: Vec<f32> = log.records().iter().map(|r| r.reading.depth_mm).collect();
        assert_eq!(depths, vec![0.0, 15.0, 30.0, 45.0]);
    }

    #[test]
    fn csv_export_shape() {
        let mut log = HistoryLog::new();
        log.append(record(105.0, 25.0));
        let csv = log.to_csv();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "depth,temperature,moisture,voc,combustion_risk,worker_health_risk"
        );
        assert_eq!(lines.next().unwrap(), "105,25,10,100,5,8");
        assert!(lines.next().is_none());
    }
}
