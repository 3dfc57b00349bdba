//! Error reports as the CLI prints them, without mocks.

use cisc_common::{Error, ErrorCategory, ErrorReport};
use cisc_math::{stochastic_complexity, ComplexityError};

#[test]
fn empty_sequence_flows_into_unified_error() {
    let empty: Vec<u32> = Vec::new();
    let err: Error = stochastic_complexity(&empty).unwrap_err().into();
    assert_eq!(err.code(), 12);
    assert_eq!(err.category(), ErrorCategory::Input);
    assert!(matches!(err, Error::Complexity(ComplexityError::EmptySequence)));
}

#[test]
fn human_report_has_reason_and_fix() {
    let report = Error::LengthMismatch { x_len: 1, y_len: 2 }.report();
    let text = report.to_string();
    assert!(text.starts_with("✗ input error"));
    assert!(text.contains("Reason: invalid input: sequences differ in length"));
    assert!(text.contains("Fix: "));
}

#[test]
fn report_round_trips_through_json() {
    let report = Error::InvalidInput("empty x".into()).report();
    let json = serde_json::to_string(&report).unwrap();
    let back: ErrorReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
