//! Stochastic complexity (NML code length) of a discrete sequence.
//!
//! `SC(X) = sum(freq * (log2 n - log2 freq)) + log2 C(L, n)`, in bits. Lower
//! means the sample is more compressible under the multinomial model class.

use std::hash::Hash;

use serde::Serialize;

use super::frequency::FrequencyProfile;
use super::regret::{RecurrenceState, DEFAULT_PRECISION_DIGITS};
use crate::error::Result;

/// `log2(x)` for positive `x`, and `log2(1) = 0` otherwise.
///
/// Frequencies and regrets are at least one for well-formed input, so the
/// clamp only triggers for malformed callers.
pub fn log2_clamped(x: f64) -> f64 {
    if x > 0.0 {
        x.log2()
    } else {
        0.0
    }
}

/// Terms that make up one stochastic complexity value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityBreakdown {
    /// Sample size `n`.
    pub samples: usize,
    /// Distinct symbols `L`.
    pub categories: usize,
    /// Negative log2 maximum likelihood of the sample.
    pub deficiency_bits: f64,
    /// `C(L, n)`, absent when it exceeds the `f64` range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regret: Option<f64>,
    /// `log2 C(L, n)`.
    pub regret_bits: f64,
    /// `deficiency_bits + regret_bits`.
    pub total_bits: f64,
}

impl ComplexityBreakdown {
    /// Score a prepared profile.
    pub fn from_profile<T>(profile: &FrequencyProfile<'_, T>, digits: u32) -> Result<Self> {
        let samples = profile.sample_size();
        let categories = profile.domain_size();
        let deficiency_bits = profile.log_likelihood_deficiency();
        let state = RecurrenceState::solve(categories, samples, digits)?;
        let regret_bits = state.log2();
        Ok(ComplexityBreakdown {
            samples,
            categories,
            deficiency_bits,
            regret: state.value(),
            regret_bits,
            total_bits: deficiency_bits + regret_bits,
        })
    }
}

/// Stochastic complexity of `sequence` in bits.
///
/// Fails with [`ComplexityError::EmptySequence`](crate::ComplexityError::EmptySequence)
/// on empty input.
pub fn stochastic_complexity<T: Eq + Hash>(sequence: &[T]) -> Result<f64> {
    stochastic_complexity_with_precision(sequence, DEFAULT_PRECISION_DIGITS)
}

pub fn stochastic_complexity_with_precision<T: Eq + Hash>(
    sequence: &[T],
    digits: u32,
) -> Result<f64> {
    complexity_breakdown_with_precision(sequence, digits).map(|b| b.total_bits)
}

/// Stochastic complexity together with its two terms.
pub fn complexity_breakdown<T: Eq + Hash>(sequence: &[T]) -> Result<ComplexityBreakdown> {
    complexity_breakdown_with_precision(sequence, DEFAULT_PRECISION_DIGITS)
}

pub fn complexity_breakdown_with_precision<T: Eq + Hash>(
    sequence: &[T],
    digits: u32,
) -> Result<ComplexityBreakdown> {
    let profile = FrequencyProfile::from_sequence(sequence)?;
    ComplexityBreakdown::from_profile(&profile, digits)
}
