//! Frequency profile of a discrete sequence.
//!
//! Distinct symbols are kept in first-occurrence order so that every sum
//! over the profile visits terms in the same order on every run. Hash-map
//! iteration order is never observable.

use std::collections::HashMap;
use std::hash::Hash;

use super::complexity::log2_clamped;
use crate::error::{ComplexityError, Result};

/// Symbol counts of one sequence.
///
/// Invariants: counts sum to `sample_size()`, `domain_size() >= 1`, and
/// every count is at least one.
#[derive(Debug, Clone)]
pub struct FrequencyProfile<'a, T> {
    symbols: Vec<&'a T>,
    counts: Vec<usize>,
    index: HashMap<&'a T, usize>,
    samples: usize,
}

impl<'a, T: Eq + Hash> FrequencyProfile<'a, T> {
    /// Count every symbol of `sequence`. Linear in its length.
    pub fn from_sequence(sequence: &'a [T]) -> Result<Self> {
        Self::from_symbols(sequence.iter())
    }

    /// Count symbols yielded by an iterator of references.
    ///
    /// Used for the cells of a partition, which borrow from the original
    /// sequence instead of copying it.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut profile = FrequencyProfile {
            symbols: Vec::new(),
            counts: Vec::new(),
            index: HashMap::new(),
            samples: 0,
        };
        for symbol in symbols {
            match profile.index.get(symbol) {
                Some(&slot) => profile.counts[slot] += 1,
                None => {
                    profile.index.insert(symbol, profile.symbols.len());
                    profile.symbols.push(symbol);
                    profile.counts.push(1);
                }
            }
            profile.samples += 1;
        }
        if profile.samples == 0 {
            return Err(ComplexityError::EmptySequence);
        }
        Ok(profile)
    }

    /// Occurrences of `symbol`; zero when it never occurs.
    pub fn count_of(&self, symbol: &T) -> usize {
        self.index
            .get(symbol)
            .map(|&slot| self.counts[slot])
            .unwrap_or(0)
    }
}

impl<'a, T> FrequencyProfile<'a, T> {
    /// Sample size `n`.
    pub fn sample_size(&self) -> usize {
        self.samples
    }

    /// Number of distinct symbols `L`.
    pub fn domain_size(&self) -> usize {
        self.counts.len()
    }

    /// Counts in first-occurrence order.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// `(symbol, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a T, usize)> + '_ {
        self.symbols.iter().copied().zip(self.counts.iter().copied())
    }

    /// Negative log2-likelihood of the sample under its own maximum
    /// likelihood multinomial, in bits:
    /// `sum(freq * (log2(n) - log2(freq)))`.
    pub fn log_likelihood_deficiency(&self) -> f64 {
        let log_n = log2_clamped(self.samples as f64);
        self.counts
            .iter()
            .map(|&freq| freq as f64 * (log_n - log2_clamped(freq as f64)))
            .sum()
    }
}
