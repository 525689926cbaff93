//! Fuzz target for split keyword parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the split parser, checking
//! for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<galcat::Split>();
    }
});
