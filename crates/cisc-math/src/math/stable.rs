//! Numerically stable log-domain accumulation.
//!
//! The exact oracle sums terms such as `n!/(k!(n-k)!) * (k/n)^k * ...` whose
//! individual factors overflow `f64` long before the sum does. Terms are
//! therefore carried as natural logarithms and combined here.

/// Streaming log-sum-exp accumulator.
///
/// Keeps a running maximum and the sum of `exp(v - max)`, rescaling the sum
/// whenever a larger term arrives. Lets the oracle fold an enumeration of
/// compositions without materializing every term.
#[derive(Debug, Clone, Copy)]
pub struct LogSumExp {
    max: f64,
    scaled_sum: f64,
    saw_nan: bool,
}

impl Default for LogSumExp {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSumExp {
    pub fn new() -> Self {
        Self {
            max: f64::NEG_INFINITY,
            scaled_sum: 0.0,
            saw_nan: false,
        }
    }

    /// Add one log-domain term.
    pub fn push(&mut self, v: f64) {
        if v.is_nan() {
            self.saw_nan = true;
            return;
        }
        if v == f64::NEG_INFINITY {
            return;
        }
        if v == f64::INFINITY {
            self.max = f64::INFINITY;
            return;
        }
        if self.max == f64::INFINITY {
            return;
        }
        if v <= self.max {
            self.scaled_sum += (v - self.max).exp();
        } else {
            self.scaled_sum = self.scaled_sum * (self.max - v).exp() + 1.0;
            self.max = v;
        }
    }

    /// Current value of log(sum(exp(terms))).
    pub fn value(&self) -> f64 {
        if self.saw_nan {
            return f64::NAN;
        }
        if self.max == f64::NEG_INFINITY || self.max == f64::INFINITY {
            return self.max;
        }
        self.max + self.scaled_sum.ln()
    }
}
