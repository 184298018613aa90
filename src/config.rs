//! System configuration parameters
//!
//! All tunable parameters for the SiloGuard daemon. Values can be overridden
//! via a JSON config file or hot-reloaded at runtime through
//! [`AppCommand::UpdateConfig`](crate::app::commands::AppCommand).
//!
//! The actuation threshold and the worker-health advisory bands are distinct
//! policies (actuation vs. safety advisory) and are deliberately kept as
//! independent fields rather than unified.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Serial link ---
    /// Serial port name (e.g. `/dev/ttyUSB0`, `COM21`). None = auto-detect.
    pub serial_port: Option<String>,
    /// Serial baud rate.
    pub baud_rate: u32,
    /// Bounded read timeout for the non-blocking poll (milliseconds).
    pub read_timeout_ms: u64,

    // --- Actuation ---
    /// Combustion risk (%) above which the alarm is commanded on.
    pub alarm_threshold_pct: u8,

    // --- Worker-health advisory bands ---
    /// Health risk (%) at which advice moves from safe to warning.
    pub health_warn_pct: u8,
    /// Health risk (%) at which advice moves from warning to danger.
    pub health_danger_pct: u8,

    // --- Timing ---
    /// Control loop tick interval (milliseconds).
    pub tick_interval_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Serial link
            serial_port: None,
            baud_rate: 9600,
            read_timeout_ms: 1,

            // Actuation
            alarm_threshold_pct: 20,

            // Advisory bands (green < 30, yellow 30-70, red >= 70)
            health_warn_pct: 30,
            health_danger_pct: 70,

            // Timing
            tick_interval_ms: 100, // 10 Hz
        }
    }
}

impl SystemConfig {
    /// Load configuration from a JSON file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Range-check the configuration. Invalid values are rejected, not
    /// silently clamped.
    pub fn validate(&self) -> core::result::Result<(), &'static str> {
        if self.alarm_threshold_pct > 100 {
            return Err("alarm_threshold_pct must be 0-100");
        }
        if self.health_warn_pct >= self.health_danger_pct {
            return Err("health_warn_pct must be below health_danger_pct");
        }
        if self.health_danger_pct > 100 {
            return Err("health_danger_pct must be 0-100");
        }
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be non-zero");
        }
        if self.baud_rate == 0 {
            return Err("baud_rate must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.validate().is_ok());
        assert!(c.alarm_threshold_pct <= 100);
        assert!(c.health_warn_pct < c.health_danger_pct);
        assert!(c.tick_interval_ms > 0);
        assert!(c.tick_interval_ms <= 100, "tick must be sub-second polling");
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.alarm_threshold_pct, c2.alarm_threshold_pct);
        assert_eq!(c.health_warn_pct, c2.health_warn_pct);
        assert_eq!(c.tick_interval_ms, c2.tick_interval_ms);
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let c: SystemConfig = serde_json::from_str(r#"{"alarm_threshold_pct": 35}"#).unwrap();
        assert_eq!(c.alarm_threshold_pct, 35);
        assert_eq!(c.baud_rate, SystemConfig::default().baud_rate);
    }

    #[test]
    fn advisory_bands_stay_ordered() {
        let c = SystemConfig {
            health_warn_pct: 70,
            health_danger_pct: 30,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn thresholds_are_independent_policies() {
        // The actuation threshold and the advisory bands are separate
        // constants; changing one must not constrain the others.
        let c = SystemConfig {
            alarm_threshold_pct: 90,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = SystemConfig::load_from(Path::new("/nonexistent/siloguard.json"));
        assert!(err.is_err());
    }
}
