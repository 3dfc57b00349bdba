//! Fuzz target for JSON pair files.
//!
//! Parsing and then scoring whatever parsed must never panic.

#![no_main]

use cisc_core::input::parse_pairs;
use cisc_core::{score_pairs, BatchOptions, CiscScorer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(pairs) = parse_pairs(text) {
        let outcomes = score_pairs(&pairs, &BatchOptions::serial(CiscScorer::new()));
        assert_eq!(outcomes.len(), pairs.len());
    }
});
