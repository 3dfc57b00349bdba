//! Fuzz target for directional scoring.
//!
//! Arbitrary aligned or misaligned sequences must yield either a finite
//! score pair or an input error, never a panic.

#![no_main]

use arbitrary::Arbitrary;
use cisc_core::{cisc, decide, Direction};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct PairInput {
    x: Vec<u8>,
    y: Vec<u16>,
}

fuzz_target!(|input: PairInput| {
    match cisc(&input.x, &input.y) {
        Ok(scores) => {
            assert!(scores.x_to_y.is_finite() && scores.x_to_y >= 0.0);
            assert!(scores.y_to_x.is_finite() && scores.y_to_x >= 0.0);
            if scores.x_to_y == scores.y_to_x {
                assert_eq!(decide(&scores), Direction::Undecided);
            }
        }
        Err(err) => assert!(err.is_invalid_input()),
    }
});
