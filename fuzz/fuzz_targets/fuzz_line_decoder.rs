//! Fuzz target: `LineDecoder::push`
//!
//! Drives arbitrary byte sequences into the streaming line decoder and
//! asserts that it never panics, never yields a frame longer than its
//! internal line buffer, and recovers cleanly after a reset.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use petalcap::proto::codec::LineDecoder;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    for &byte in data {
        if let Some(frame) = decoder.push(byte) {
            assert!(frame.len() <= 32, "frame exceeds the line buffer");
            assert!(!frame.contains(&b':'), "terminator leaked into a frame");
            assert!(!frame.contains(&b'\n'), "line ending leaked into a frame");
        }
    }

    // After a reset the decoder must accept a clean frame again.
    decoder.reset();
    let mut yielded = None;
    for &byte in b"M:" {
        if let Some(frame) = decoder.push(byte) {
            yielded = Some(frame.to_vec());
        }
    }
    assert_eq!(yielded.as_deref(), Some(&b"M"[..]));
});
