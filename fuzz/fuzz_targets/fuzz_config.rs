//! Fuzz target for cisc.toml parsing and validation.

#![no_main]

use cisc_config::ScoringConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Should never panic, only return an error
        let _ = ScoringConfig::from_toml_str(text);
    }
});
