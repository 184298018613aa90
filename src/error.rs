//! Unified error types for the SiloGuard core.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they can
//! be cheaply passed around without allocation. None of these conditions are
//! fatal to the control loop: each tick recovers locally and keeps ticking.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The telemetry source failed or produced unusable input.
    Telemetry(TelemetryError),
    /// The combustion-risk predictor could not produce an estimate.
    Predictor(PredictorError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telemetry(e) => write!(f, "telemetry: {e}"),
            Self::Predictor(e) => write!(f, "predictor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Telemetry errors
// ---------------------------------------------------------------------------

/// Failures on the inbound telemetry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// The serial link is absent or disconnected. Non-fatal: the loop
    /// continues reporting the last-known reading and the next tick retries.
    SourceUnavailable,
    /// A line arrived but failed validation. Non-fatal: discarded, no state
    /// change.
    Malformed(ParseError),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable => write!(f, "source unavailable"),
            Self::Malformed(e) => write!(f, "malformed line: {e}"),
        }
    }
}

impl From<TelemetryError> for Error {
    fn from(e: TelemetryError) -> Self {
        Self::Telemetry(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Why a raw telemetry line failed to decompose into a [`Reading`].
///
/// [`Reading`]: crate::telemetry::Reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The line was empty or whitespace only.
    EmptyLine,
    /// The line did not split into exactly four comma-separated fields.
    WrongFieldCount,
    /// A field was present but did not parse as a number.
    NonNumericField,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLine => write!(f, "empty line"),
            Self::WrongFieldCount => write!(f, "wrong field count"),
            Self::NonNumericField => write!(f, "non-numeric field"),
        }
    }
}

impl From<ParseError> for TelemetryError {
    fn from(e: ParseError) -> Self {
        Self::Malformed(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Telemetry(TelemetryError::Malformed(e))
    }
}

// ---------------------------------------------------------------------------
// Predictor errors
// ---------------------------------------------------------------------------

/// Failures from the combustion-risk predictor.
///
/// These are a *reporting* fallback, not a safety statement: when the
/// predictor is unavailable combustion risk is reported as 0, which must be
/// distinguished from "measured safe". Worker-health risk is unaffected and
/// still computed from raw sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorError {
    /// The model is missing or errored during inference.
    Unavailable,
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "model unavailable"),
        }
    }
}

impl From<PredictorError> for Error {
    fn from(e: PredictorError) -> Self {
        Self::Predictor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
