//! NML regret of the multinomial model class.
//!
//! `C(L, n)` is the normalizing sum of the normalized maximum likelihood
//! distribution for `L` categories over `n` trials:
//!
//! ```text
//! C(L, n) = sum over k1+..+kL = n of  n!/(k1!..kL!) * prod (ki/n)^ki
//! ```
//!
//! Summing it directly needs factorials and an exponential number of
//! compositions. Instead (Kontkanen & Myllymäki, 2007):
//!
//! - `C(1, n) = 1`.
//! - `C(2, n) = sum_{k>=0} b_k` with `b_0 = 1`, `b_k = b_{k-1} (n-k+1)/n`,
//!   truncated after `ceil(2 + sqrt(2 n d ln 10))` terms for `d` stable
//!   decimal digits.
//! - `C(j, n) = C(j-1, n) + n/(j-2) * C(j-2, n)` for `j >= 3`.
//!
//! `C(L, n)` leaves the `f64` range once `L` reaches the hundreds, while
//! its logarithm stays small. The recurrence therefore carries a mantissa
//! pair and a shared power-of-two exponent. Scaling by a power of two is
//! exact, so wherever the plain value fits the mantissa holds the same bits.
//! Code lengths use [`log2_regret`]; [`regret`] returns the plain value and
//! fails when it does not fit.

use std::f64::consts::LN_10;

use crate::error::{ComplexityError, Result};

/// Stable decimal digits targeted by the binary seed.
pub const DEFAULT_PRECISION_DIGITS: u32 = 10;

/// Mantissas above `2^RESCALE_BITS` are scaled down by that power.
const RESCALE_BITS: i32 = 512;

/// `2^exp` for `exp` in the normal exponent range.
fn pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((1023 + exp) as u64) << 52)
}

/// Number of series terms summed for the `L = 2` seed.
///
/// `ceil(2 + sqrt(2 * n * d * ln 10))`.
pub fn truncation_bound(samples: usize, digits: u32) -> usize {
    (2.0 + (2.0 * samples as f64 * digits as f64 * LN_10).sqrt()).ceil() as usize
}

/// Two consecutive regrets `(C(j-1, n), C(j, n))` carried through the
/// category recurrence, both scaled by `2^-exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecurrenceState {
    pub old_sum: f64,
    pub total: f64,
    /// Power of two factored out of both sums.
    pub exponent: i32,
}

impl RecurrenceState {
    /// State at `j = 2`: `(C(1, n), C(2, n))`.
    pub fn seed(samples: usize, digits: u32) -> Self {
        RecurrenceState {
            old_sum: 1.0,
            total: binary_regret(samples, digits),
            exponent: 0,
        }
    }

    /// Move from `(C(j-2), C(j-1))` to `(C(j-1), C(j))`.
    pub fn advance(self, j: usize, samples: usize) -> Self {
        let n = samples as f64;
        let mut next = RecurrenceState {
            old_sum: self.total,
            total: self.total + (n * self.old_sum) / (j - 2) as f64,
            exponent: self.exponent,
        };
        if next.total > pow2(RESCALE_BITS) {
            let down = pow2(-RESCALE_BITS);
            next.old_sum *= down;
            next.total *= down;
            next.exponent += RESCALE_BITS;
        }
        next
    }

    /// Run the recurrence up to `C(categories, samples)`.
    pub fn solve(categories: usize, samples: usize, digits: u32) -> Result<Self> {
        if categories == 0 || samples == 0 {
            return Err(ComplexityError::DegenerateModel {
                categories,
                samples,
            });
        }
        if digits == 0 {
            return Err(ComplexityError::InvalidPrecision { digits });
        }
        if categories == 1 {
            return Ok(RecurrenceState {
                old_sum: 1.0,
                total: 1.0,
                exponent: 0,
            });
        }
        let seed = RecurrenceState::seed(samples, digits);
        Ok((3..=categories).fold(seed, |state, j| state.advance(j, samples)))
    }

    /// `log2` of the current regret. Finite for every reachable state.
    pub fn log2(&self) -> f64 {
        self.total.log2() + self.exponent as f64
    }

    /// Current regret as a plain real, `None` when it exceeds `f64`.
    pub fn value(&self) -> Option<f64> {
        let value = match self.exponent {
            0 => self.total,
            e if e <= 1023 => self.total * pow2(e),
            _ => f64::INFINITY,
        };
        value.is_finite().then_some(value)
    }
}

/// Truncated series for `C(2, n)`.
fn binary_regret(samples: usize, digits: u32) -> f64 {
    let n = samples as f64;
    let bound = truncation_bound(samples, digits);
    let mut total = 1.0;
    let mut b = 1.0;
    for k in 1..=bound {
        // Once k exceeds n the factor hits zero and every later term stays zero.
        b *= (n - k as f64 + 1.0) / n;
        total += b;
    }
    total
}

/// `C(categories, samples)` at the default precision.
pub fn regret(categories: usize, samples: usize) -> Result<f64> {
    regret_with_precision(categories, samples, DEFAULT_PRECISION_DIGITS)
}

/// `C(categories, samples)` with `digits` stable decimal digits in the seed.
///
/// O(sqrt(n * d) + L). Fails for zero categories, zero samples, or zero
/// digits, and with [`ComplexityError::RegretOverflow`] when the value does
/// not fit in an `f64`.
pub fn regret_with_precision(categories: usize, samples: usize, digits: u32) -> Result<f64> {
    RecurrenceState::solve(categories, samples, digits)?
        .value()
        .ok_or(ComplexityError::RegretOverflow {
            categories,
            samples,
        })
}

/// `log2 C(categories, samples)` at the default precision.
pub fn log2_regret(categories: usize, samples: usize) -> Result<f64> {
    log2_regret_with_precision(categories, samples, DEFAULT_PRECISION_DIGITS)
}

/// `log2 C(categories, samples)`; finite for any domain and sample size.
pub fn log2_regret_with_precision(categories: usize, samples: usize, digits: u32) -> Result<f64> {
    RecurrenceState::solve(categories, samples, digits).map(|state| state.log2())
}
