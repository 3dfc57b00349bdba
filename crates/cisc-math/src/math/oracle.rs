//! Exact regret by explicit enumeration, for testing the recurrence.
//!
//! Everything here is factorial-based and enumerates compositions of `n`,
//! so it is only usable for small samples. Terms are summed in the natural
//! log domain. Log-factorials come from a [`LogFactorialCache`] owned by
//! the caller; there is no global table.

use std::f64::consts::LN_2;
use std::hash::Hash;

use super::frequency::FrequencyProfile;
use super::stable::LogSumExp;
use crate::error::{ComplexityError, Result};

/// Largest sample size the oracle accepts.
pub const MAX_EXACT_SAMPLES: usize = 200;

/// Table of `ln k!`, extended on demand.
#[derive(Debug, Clone)]
pub struct LogFactorialCache {
    table: Vec<f64>,
}

impl Default for LogFactorialCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFactorialCache {
    /// Cache holding `ln 0! = 0`.
    pub fn new() -> Self {
        LogFactorialCache { table: vec![0.0] }
    }

    /// Cache prefilled up to `ln n!`.
    pub fn with_capacity(n: usize) -> Self {
        let mut cache = Self::new();
        cache.extend_to(n);
        cache
    }

    /// Largest `k` with `ln k!` already tabulated.
    pub fn len(&self) -> usize {
        self.table.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() <= 1
    }

    fn extend_to(&mut self, n: usize) {
        while self.table.len() <= n {
            let k = self.table.len();
            let prev = self.table[k - 1];
            self.table.push(prev + (k as f64).ln());
        }
    }

    /// `ln k!`.
    pub fn log_factorial(&mut self, k: usize) -> f64 {
        self.extend_to(k);
        self.table[k]
    }

    /// `ln C(n, k)`; NEG_INFINITY when `k > n`.
    pub fn log_binomial(&mut self, n: usize, k: usize) -> f64 {
        if k > n {
            return f64::NEG_INFINITY;
        }
        self.log_factorial(n) - self.log_factorial(k) - self.log_factorial(n - k)
    }

    /// `ln (n! / (k1! ... kL!))` with `n = sum(parts)`.
    pub fn log_multinomial(&mut self, parts: &[usize]) -> f64 {
        let n: usize = parts.iter().sum();
        let mut out = self.log_factorial(n);
        for &k in parts {
            out -= self.log_factorial(k);
        }
        out
    }
}

/// `ln((k/n)^k)`, with `0^0 = 1`.
fn log_ml_factor(k: usize, n: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    k as f64 * (k as f64 / n as f64).ln()
}

fn check_oracle_input(categories: usize, samples: usize) -> Result<()> {
    if categories == 0 || samples == 0 {
        return Err(ComplexityError::DegenerateModel {
            categories,
            samples,
        });
    }
    if samples > MAX_EXACT_SAMPLES {
        return Err(ComplexityError::OracleLimit {
            samples,
            limit: MAX_EXACT_SAMPLES,
        });
    }
    Ok(())
}

/// Exact `C(2, n) = sum_k C(n,k) (k/n)^k ((n-k)/n)^(n-k)` over all two-way
/// compositions.
pub fn exact_binary_regret(samples: usize, cache: &mut LogFactorialCache) -> Result<f64> {
    check_oracle_input(2, samples)?;
    let mut acc = LogSumExp::new();
    for k in 0..=samples {
        acc.push(
            cache.log_binomial(samples, k)
                + log_ml_factor(k, samples)
                + log_ml_factor(samples - k, samples),
        );
    }
    Ok(acc.value().exp())
}

/// Exact `C(categories, samples)` by enumerating every composition of
/// `samples` into `categories` non-negative parts.
///
/// The number of compositions is `C(n + L - 1, L - 1)`; keep both small.
pub fn exact_regret(
    categories: usize,
    samples: usize,
    cache: &mut LogFactorialCache,
) -> Result<f64> {
    check_oracle_input(categories, samples)?;
    if categories == 1 {
        return Ok(1.0);
    }
    cache.extend_to(samples);
    let mut acc = LogSumExp::new();
    let mut parts = vec![0usize; categories];
    enumerate_compositions(&mut parts, 0, samples, &mut |parts| {
        let mut term = cache.log_multinomial(parts);
        for &k in parts.iter() {
            term += log_ml_factor(k, samples);
        }
        acc.push(term);
    });
    Ok(acc.value().exp())
}

/// Fill `parts[slot..]` with every split of `remaining` and call `visit`
/// on each complete composition.
fn enumerate_compositions<F>(parts: &mut [usize], slot: usize, remaining: usize, visit: &mut F)
where
    F: FnMut(&[usize]),
{
    if slot + 1 == parts.len() {
        parts[slot] = remaining;
        visit(parts);
        return;
    }
    for k in 0..=remaining {
        parts[slot] = k;
        enumerate_compositions(parts, slot + 1, remaining - k, visit);
    }
}

/// Stochastic complexity using the exact regret, in bits.
pub fn exact_stochastic_complexity<T: Eq + Hash>(
    sequence: &[T],
    cache: &mut LogFactorialCache,
) -> Result<f64> {
    let profile = FrequencyProfile::from_sequence(sequence)?;
    let regret = exact_regret(profile.domain_size(), profile.sample_size(), cache)?;
    Ok(profile.log_likelihood_deficiency() + regret.ln() / LN_2)
}
