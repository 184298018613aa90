//! Fuzz the telemetry line parser with arbitrary bytes.
//!
//! The parser must be total: any input either yields a fully-finite
//! `Reading` or a typed `ParseError`, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use siloguard::telemetry::Reading;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = core::str::from_utf8(data) {
        if let Ok(r) = Reading::parse(s) {
            assert!(r.depth_mm.is_finite());
            assert!(r.temperature_c.is_finite());
            assert!(r.moisture_pct.is_finite());
            assert!(r.voc.is_finite());
        }
    }
});
