//! Fuzz the latest-wins receive-buffer extraction with raw link bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use siloguard::telemetry::{extract_latest_line, RxBuffer, RX_BUF_CAP};

fuzz_target!(|data: &[u8]| {
    let mut buf = RxBuffer::new();
    // Feed in chunks the way the serial adapter would, extracting between
    // reads. Overflowing bytes are dropped like a saturated UART FIFO.
    for chunk in data.chunks(RX_BUF_CAP / 4) {
        for &b in chunk {
            let _ = buf.push(b);
        }
        let _ = extract_latest_line(&mut buf);
        assert!(!buf.contains(&b'\n'));
    }
});
