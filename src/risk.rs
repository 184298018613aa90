//! Risk scoring: combustion risk via the [`Predictor`] capability, worker
//! health risk from a local formula.
//!
//! The two scores are independent by design. Combustion risk is gated
//! ("triple-gate": it only crosses 50% when temperature, moisture and VOC
//! jointly exceed their thresholds), while worker-health risk is a plain
//! additive model over gas exposure and heat stress with no interaction term.

use log::warn;
use serde::Serialize;

use crate::error::PredictorError;
use crate::telemetry::Reading;

// ---------------------------------------------------------------------------
// Predictor capability
// ---------------------------------------------------------------------------

/// Output of one combustion-risk inference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Estimated combustion risk, 0-100 %.
    pub combustion_risk_pct: f32,
    /// Estimated time to incident, clamped to 1-72 hours.
    pub time_to_incident_hours: f32,
}

/// Side-effect-free combustion-risk predictor.
///
/// Implementations are interchangeable without touching the risk engine:
/// the deterministic [`GateModel`], a trained regression model, or a test
/// stub all satisfy the same contract.
pub trait Predictor {
    fn predict(&self, reading: &Reading) -> Result<Prediction, PredictorError>;
}

// ---------------------------------------------------------------------------
// GateModel — the reference rule-based predictor
// ---------------------------------------------------------------------------

/// Temperature above which the gate can open (°C).
const GATE_TEMP_C: f32 = 45.0;
/// Moisture above which the gate can open (%).
const GATE_MOISTURE_PCT: f32 = 50.0;
/// VOC above which the gate can open (sensor units).
const GATE_VOC: f32 = 200.0;

/// Normalisation ceilings for the smooth blend.
const TEMP_CEILING_C: f32 = 75.0;
const MOISTURE_CEILING_PCT: f32 = 100.0;
const VOC_CEILING: f32 = 800.0;

/// Deterministic triple-gate predictor.
///
/// This is the formula the production regression model was fitted against;
/// it must be preserved verbatim:
///
/// - `base = (temp/75 + moisture/100 + voc/800) / 3`
/// - gate met (`temp > 45 && moisture > 50 && voc > 200`):
///   `risk = 50 + base*50`, else `risk = base*45`; clamped to `[0, 100]`.
/// - `time_to_incident = clamp(1, 72, 72 - 0.7*risk)` hours.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateModel;

impl GateModel {
    pub fn new() -> Self {
        Self
    }
}

impl Predictor for GateModel {
    fn predict(&self, r: &Reading) -> Result<Prediction, PredictorError> {
        let gate_met = r.temperature_c > GATE_TEMP_C
            && r.moisture_pct > GATE_MOISTURE_PCT
            && r.voc > GATE_VOC;

        let base = (r.temperature_c / TEMP_CEILING_C
            + r.moisture_pct / MOISTURE_CEILING_PCT
            + r.voc / VOC_CEILING)
            / 3.0;

        let risk = if gate_met {
            50.0 + base * 50.0
        } else {
            base * 45.0
        };
        let risk = risk.clamp(0.0, 100.0);

        let time_to_incident_hours = (72.0 - 0.7 * risk).clamp(1.0, 72.0);

        Ok(Prediction {
            combustion_risk_pct: risk,
            time_to_incident_hours,
        })
    }
}

// ---------------------------------------------------------------------------
// Worker-health advisory bands
// ---------------------------------------------------------------------------

/// Advisory classification of the worker-health risk score.
///
/// The band thresholds are a safety-advisory policy, separate from the
/// actuation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthAdvisory {
    /// Conditions are stable.
    Safe,
    /// Elevated gas or heat.
    Warning,
    /// Evacuate immediately.
    Danger,
}

impl HealthAdvisory {
    /// Classify a health-risk score against the configured bands.
    pub fn classify(health_risk_pct: u8, warn_pct: u8, danger_pct: u8) -> Self {
        if health_risk_pct >= danger_pct {
            Self::Danger
        } else if health_risk_pct >= warn_pct {
            Self::Warning
        } else {
            Self::Safe
        }
    }
}

// ---------------------------------------------------------------------------
// Risk engine
// ---------------------------------------------------------------------------

/// Gas exposure is scaled against a nominal VOC ceiling and contributes up
/// to half the health score.
const HEALTH_VOC_CEILING: f32 = 800.0;
/// Heat stress is measured above a comfort baseline (°C) ...
const HEALTH_TEMP_BASELINE_C: f32 = 25.0;
/// ... and saturates over this band above the baseline (°C).
const HEALTH_TEMP_BAND_C: f32 = 30.0;

/// One derived risk assessment. Never persisted independently of the
/// [`Reading`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Combustion risk, 0-100, truncated to an integer.
    pub combustion_risk: u8,
    /// Worker-health risk, 0-100, truncated to an integer.
    pub worker_health_risk: u8,
    /// Estimated time to incident (hours, 1-72). 72 when the predictor
    /// was unavailable.
    pub time_to_incident_hours: f32,
    /// False when the predictor was unavailable and combustion risk is the
    /// 0 reporting fallback rather than a real estimate.
    pub predictor_ok: bool,
}

/// Turns a validated [`Reading`] into a [`RiskAssessment`].
pub struct RiskEngine<P: Predictor> {
    predictor: P,
}

impl<P: Predictor> RiskEngine<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    /// Score one reading.
    ///
    /// Predictor failure is a reporting fallback, not an error: combustion
    /// risk defaults to 0 and the assessment is flagged so callers can
    /// distinguish "no estimate" from "measured safe". Worker-health risk is
    /// always computed from the raw sensors.
    pub fn assess(&self, reading: &Reading) -> RiskAssessment {
        let (combustion_risk, time_to_incident_hours, predictor_ok) =
            match self.predictor.predict(reading) {
                Ok(p) => (
                    (p.combustion_risk_pct as i64).clamp(0, 100) as u8,
                    p.time_to_incident_hours.clamp(1.0, 72.0),
                    true,
                ),
                Err(e) => {
                    warn!("predictor unavailable ({e}), reporting combustion risk 0");
                    (0, 72.0, false)
                }
            };

        RiskAssessment {
            combustion_risk,
            worker_health_risk: Self::worker_health_risk(reading),
            time_to_incident_hours,
            predictor_ok,
        }
    }

    /// Additive heat + gas exposure model, clamped to 0-100.
    ///
    /// `(voc/800)*50 + max(0, temp-25)/30 * 50` — each half contributes up
    /// to 50 points independently; no interaction term.
    fn worker_health_risk(reading: &Reading) -> u8 {
        let gas = (reading.voc / HEALTH_VOC_CEILING) * 50.0;
        let heat =
            ((reading.temperature_c - HEALTH_TEMP_BASELINE_C).max(0.0) / HEALTH_TEMP_BAND_C) * 50.0;
        ((gas + heat) as i64).clamp(0, 100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temp: f32, moisture: f32, voc: f32) -> Reading {
        Reading {
            depth_mm: 60.0,
            temperature_c: temp,
            moisture_pct: moisture,
            voc,
        }
    }

    struct DeadModel;
    impl Predictor for DeadModel {
        fn predict(&self, _r: &Reading) -> Result<Prediction, PredictorError> {
            Err(PredictorError::Unavailable)
        }
    }

    #[test]
    fn gate_not_met_stays_below_fifty() {
        // Each case violates exactly one gate condition.
        for r in [
            reading(45.0, 90.0, 600.0),
            reading(70.0, 50.0, 600.0),
            reading(70.0, 90.0, 200.0),
        ] {
            let p = GateModel.predict(&r).unwrap();
            assert!(
                p.combustion_risk_pct < 50.0,
                "risk {} for {r:?}",
                p.combustion_risk_pct
            );
        }
    }

    #[test]
    fn gate_met_jumps_past_fifty() {
        let p = GateModel.predict(&reading(46.0, 51.0, 201.0)).unwrap();
        assert!(p.combustion_risk_pct >= 50.0);

        let p = GateModel.predict(&reading(75.0, 100.0, 800.0)).unwrap();
        assert!(p.combustion_risk_pct >= 50.0);
        assert!(p.combustion_risk_pct <= 100.0);
    }

    #[test]
    fn training_verification_scenario() {
        // The reference case from model verification: low temp, high
        // moisture and VOC. The gate is not met, so risk stays under 50.
        let r = Reading {
            depth_mm: 105.0,
            temperature_c: 25.0,
            moisture_pct: 90.0,
            voc: 600.0,
        };
        let p = GateModel.predict(&r).unwrap();
        assert!(p.combustion_risk_pct < 50.0);
        assert!(p.combustion_risk_pct >= 0.0);
        // But it is still above the 20% actuation threshold.
        assert!(p.combustion_risk_pct > 20.0);
    }

    #[test]
    fn time_to_incident_formula() {
        let p = GateModel.predict(&reading(20.0, 10.0, 80.0)).unwrap();
        let expected = 72.0 - 0.7 * p.combustion_risk_pct;
        assert!((p.time_to_incident_hours - expected).abs() < 1e-4);

        // Saturated at the floor for maximal risk.
        let p = GateModel.predict(&reading(75.0, 100.0, 800.0)).unwrap();
        assert!(p.time_to_incident_hours >= 1.0);
        assert!(p.time_to_incident_hours <= 72.0);
    }

    #[test]
    fn worker_health_formula_reference_points() {
        let engine = RiskEngine::new(GateModel);

        // Baseline: no gas, comfort temperature.
        let a = engine.assess(&reading(25.0, 0.0, 0.0));
        assert_eq!(a.worker_health_risk, 0);

        // Gas half only: voc at the nominal ceiling contributes 50.
        let a = engine.assess(&reading(25.0, 0.0, 800.0));
        assert_eq!(a.worker_health_risk, 50);

        // Heat half only: 30°C above baseline contributes 50.
        let a = engine.assess(&reading(55.0, 0.0, 0.0));
        assert_eq!(a.worker_health_risk, 50);

        // Both saturated and beyond: clamped at 100.
        let a = engine.assess(&reading(90.0, 0.0, 1000.0));
        assert_eq!(a.worker_health_risk, 100);
    }

    #[test]
    fn health_risk_independent_of_combustion_gate() {
        let engine = RiskEngine::new(GateModel);
        let gated = engine.assess(&reading(70.0, 90.0, 600.0));
        let ungated = engine.assess(&reading(70.0, 10.0, 600.0));
        // Moisture affects combustion risk but not worker health.
        assert_eq!(gated.worker_health_risk, ungated.worker_health_risk);
        assert_ne!(gated.combustion_risk, ungated.combustion_risk);
    }

    #[test]
    fn predictor_failure_reports_zero_not_safe() {
        let engine = RiskEngine::new(DeadModel);
        let a = engine.assess(&reading(70.0, 90.0, 600.0));
        assert_eq!(a.combustion_risk, 0);
        assert!(!a.predictor_ok, "fallback must be flagged as degraded");
        // Worker health still computed from raw sensors.
        assert!(a.worker_health_risk > 0);
    }

    #[test]
    fn advisory_bands() {
        assert_eq!(HealthAdvisory::classify(0, 30, 70), HealthAdvisory::Safe);
        assert_eq!(HealthAdvisory::classify(29, 30, 70), HealthAdvisory::Safe);
        assert_eq!(
            HealthAdvisory::classify(30, 30, 70),
            HealthAdvisory::Warning
        );
        assert_eq!(
            HealthAdvisory::classify(69, 30, 70),
            HealthAdvisory::Warning
        );
        assert_eq!(HealthAdvisory::classify(70, 30, 70), HealthAdvisory::Danger);
        assert_eq!(
            HealthAdvisory::classify(100, 30, 70),
            HealthAdvisory::Danger
        );
    }
}
