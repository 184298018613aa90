//! Telemetry wire formats: inbound sensor lines, outbound actuator bytes.
//!
//! The probe rig speaks a duplex protocol over one serial link:
//!
//! - **Inbound**: newline-terminated ASCII lines `depth,temp,moisture,voc`
//!   with all four fields numeric. Anything else is discarded.
//! - **Outbound**: single ASCII command bytes (see [`ActuatorCommand`]).
//!
//! Parsing never produces a partial [`Reading`]: a line either decomposes
//! into exactly four finite numbers or fails with a typed [`ParseError`].

use serde::Serialize;

use crate::error::ParseError;

/// Longest accepted telemetry line. A well-formed line is under 30 bytes;
/// anything past this is garbage from a flapping link.
pub const MAX_LINE_LEN: usize = 64;

/// Capacity of the raw receive accumulator in the serial adapter.
pub const RX_BUF_CAP: usize = 256;

/// A raw, complete telemetry line as pulled off the link (no newline).
pub type RawLine = heapless::String<MAX_LINE_LEN>;

/// Raw receive accumulator: bytes read off the link that have not yet formed
/// a complete line.
pub type RxBuffer = heapless::Vec<u8, RX_BUF_CAP>;

/// The fixed discrete probe stations (mm) the depth channel reports.
pub const PROBE_STATIONS_MM: [f32; 13] = [
    0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0, 135.0, 150.0, 165.0, 180.0,
];

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One validated four-channel sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    /// Probe depth station (mm), one of [`PROBE_STATIONS_MM`].
    pub depth_mm: f32,
    /// Grain temperature (°C).
    pub temperature_c: f32,
    /// Moisture (%, 0-100).
    pub moisture_pct: f32,
    /// Volatile-organic-compound concentration (gas-sensor units, ~0-1000).
    pub voc: f32,
}

impl Reading {
    /// The fixed baseline the live reading resets to on scan stop.
    pub const BASELINE: Self = Self {
        depth_mm: 0.0,
        temperature_c: 25.0,
        moisture_pct: 0.0,
        voc: 0.0,
    };

    /// Parse one raw telemetry line.
    ///
    /// Succeeds only if the line splits into exactly four comma-separated
    /// tokens and every token parses as a finite float. Non-finite values
    /// (`nan`, `inf`) are rejected so downstream threshold comparisons stay
    /// well defined.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        // Field count is checked before any token is parsed, matching the
        // rig protocol: three commas first, numeric content second.
        if line.split(',').count() != 4 {
            return Err(ParseError::WrongFieldCount);
        }

        let mut fields = [0.0f32; 4];
        for (slot, token) in fields.iter_mut().zip(line.split(',')) {
            let value: f32 = token
                .trim()
                .parse()
                .map_err(|_| ParseError::NonNumericField)?;
            if !value.is_finite() {
                return Err(ParseError::NonNumericField);
            }
            *slot = value;
        }

        Ok(Self {
            depth_mm: fields[0],
            temperature_c: fields[1],
            moisture_pct: fields[2],
            voc: fields[3],
        })
    }
}

// ---------------------------------------------------------------------------
// Outbound actuator protocol
// ---------------------------------------------------------------------------

/// Single-byte commands sent to the probe rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    /// Combustion risk above the actuation threshold: ventilation/alarm on.
    AlarmOn,
    /// Normal conditions: alarm off.
    AlarmOff,
    /// Begin feeding telemetry.
    StartScan,
    /// Stop the scan and reset the rig.
    StopReset,
}

impl ActuatorCommand {
    /// The ASCII byte this command puts on the wire.
    pub const fn wire_byte(self) -> u8 {
        match self {
            Self::AlarmOn => b'B',
            Self::AlarmOff => b'N',
            Self::StartScan => b'S',
            Self::StopReset => b'R',
        }
    }
}

// ---------------------------------------------------------------------------
// Latest-wins line extraction
// ---------------------------------------------------------------------------

/// Pull the freshest complete line out of the receive accumulator.
///
/// Only the newest reading per tick matters: every older complete line in
/// `buf` is dropped, and the trailing partial line (bytes after the last
/// newline) is retained for the next poll. A full buffer with no newline is
/// cleared wholesale — it cannot contain a valid line prefix.
///
/// Returns `None` when no complete line is buffered, or when the freshest
/// complete line is non-UTF-8 or overlong (both are link garbage, not
/// telemetry).
pub fn extract_latest_line(buf: &mut RxBuffer) -> Option<RawLine> {
    let Some(last_nl) = buf.iter().rposition(|&b| b == b'\n') else {
        if buf.is_full() {
            buf.clear();
        }
        return None;
    };

    // Freshest complete line: the last segment before the final newline.
    let complete = &buf[..last_nl];
    let start = complete
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line = core::str::from_utf8(&complete[start..])
        .ok()
        .map(|s| s.trim_end_matches('\r'))
        .and_then(|s| RawLine::try_from(s).ok());

    // Retain the trailing partial line for the next poll.
    let tail_len = buf.len() - (last_nl + 1);
    buf.copy_within(last_nl + 1.., 0);
    buf.truncate(tail_len);

    line
}
