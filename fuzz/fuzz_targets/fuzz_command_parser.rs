//! Fuzz target: `HostCommand::parse` behind the frame decoder
//!
//! Feeds arbitrary bytes through the full receive path (framing, then
//! UTF-8 validation and command parsing) and asserts that no input can
//! panic it.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use petalcap::app::commands::HostCommand;
use petalcap::proto::codec::LineDecoder;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    for &byte in data {
        if let Some(frame) = decoder.push(byte) {
            if let Ok(text) = core::str::from_utf8(frame) {
                let _ = HostCommand::parse(text);
            }
        }
    }
});
