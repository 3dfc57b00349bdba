//! Directional score pair.
//!
//! ```text
//! score(X → Y) = SC(X) + L(Y | X)
//! score(Y → X) = SC(Y) + L(X | Y)
//! ```
//!
//! The scorer only reports the two totals. Choosing a direction from them
//! is [`decide`](crate::decision::decide)'s job, and an exact tie is a
//! valid outcome.

use std::hash::Hash;

use cisc_common::Result;
use cisc_config::ScoringConfig;
use cisc_math::{complexity_breakdown_with_precision, DEFAULT_PRECISION_DIGITS};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conditional::{check_aligned, ConditionalAggregator};
use crate::decision::{decide, Direction};

/// Total code lengths of both causal hypotheses, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub x_to_y: f64,
    pub y_to_x: f64,
}

impl ScorePair {
    /// Direction with the shorter total; `Undecided` on an exact tie.
    pub fn direction(&self) -> Direction {
        decide(self)
    }

    /// Absolute score difference. Larger means a clearer decision.
    pub fn confidence(&self) -> f64 {
        (self.x_to_y - self.y_to_x).abs()
    }

    pub fn is_tie(&self) -> bool {
        self.x_to_y == self.y_to_x
    }
}

/// Every term behind a [`ScorePair`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CiscReport {
    pub samples: usize,
    /// `SC(X)`.
    pub marginal_x: f64,
    /// `SC(Y)`.
    pub marginal_y: f64,
    /// `L(Y | X)`.
    pub conditional_y_given_x: f64,
    /// `L(X | Y)`.
    pub conditional_x_given_y: f64,
    pub scores: ScorePair,
    pub direction: Direction,
    pub confidence: f64,
}

/// Stateless scorer holding the precision and cell-evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CiscScorer {
    aggregator: ConditionalAggregator,
}

impl CiscScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer using `digits` stable decimal digits in the regret seed.
    pub fn with_precision(mut self, digits: u32) -> Self {
        self.aggregator = ConditionalAggregator::new(digits, self.aggregator.is_parallel());
        self
    }

    /// Evaluate partition cells on the rayon pool.
    pub fn with_parallel_cells(mut self, parallel: bool) -> Self {
        self.aggregator = ConditionalAggregator::new(self.aggregator.digits(), parallel);
        self
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        CiscScorer::new()
            .with_precision(config.precision_digits)
            .with_parallel_cells(config.parallel.cells)
    }

    pub fn precision_digits(&self) -> u32 {
        self.aggregator.digits()
    }

    /// Full breakdown for aligned sequences `x` and `y`.
    pub fn report<X, Y>(&self, x: &[X], y: &[Y]) -> Result<CiscReport>
    where
        X: Eq + Hash + Sync,
        Y: Eq + Hash + Sync,
    {
        check_aligned(x.len(), y.len())?;
        let digits = self.aggregator.digits();

        let marginal_x = complexity_breakdown_with_precision(x, digits)?.total_bits;
        let marginal_y = complexity_breakdown_with_precision(y, digits)?.total_bits;
        let conditional_y_given_x = self.aggregator.aggregate(x, y)?;
        let conditional_x_given_y = self.aggregator.aggregate(y, x)?;

        let scores = ScorePair {
            x_to_y: marginal_x + conditional_y_given_x,
            y_to_x: marginal_y + conditional_x_given_y,
        };
        debug!(
            samples = x.len(),
            x_to_y = scores.x_to_y,
            y_to_x = scores.y_to_x,
            "scored pair"
        );

        Ok(CiscReport {
            samples: x.len(),
            marginal_x,
            marginal_y,
            conditional_y_given_x,
            conditional_x_given_y,
            scores,
            direction: scores.direction(),
            confidence: scores.confidence(),
        })
    }

    /// Score pair for aligned sequences `x` and `y`.
    pub fn score<X, Y>(&self, x: &[X], y: &[Y]) -> Result<ScorePair>
    where
        X: Eq + Hash + Sync,
        Y: Eq + Hash + Sync,
    {
        self.report(x, y).map(|r| r.scores)
    }
}

/// `(score(X → Y), score(Y → X))` at the default precision.
///
/// Fails with an invalid-input error when either sequence is empty or the
/// lengths differ.
pub fn cisc<X, Y>(x: &[X], y: &[Y]) -> Result<ScorePair>
where
    X: Eq + Hash + Sync,
    Y: Eq + Hash + Sync,
{
    CiscScorer::new()
        .with_precision(DEFAULT_PRECISION_DIGITS)
        .score(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cisc_common::Error;
    use cisc_math::stochastic_complexity;

    #[test]
    fn identical_sequences_tie() {
        let x = [1, 2, 2, 3, 3, 3, 4, 1, 2];
        let scores = cisc(&x, &x).unwrap();
        assert_eq!(scores.x_to_y, scores.y_to_x);
        assert!(scores.is_tie());
        assert_eq!(scores.direction(), Direction::Undecided);
        assert_eq!(scores.x_to_y, stochastic_complexity(&x).unwrap());
    }

    #[test]
    fn many_to_one_function_points_forward() {
        // Y = X mod 2 on six X values: Y is fully determined by X but not the reverse.
        let x: Vec<u8> = (0..600).map(|i| (i % 6) as u8).collect();
        let y: Vec<u8> = x.iter().map(|v| v % 2).collect();
        let scores = cisc(&x, &y).unwrap();
        assert!(scores.x_to_y < scores.y_to_x, "{scores:?}");
        assert_eq!(scores.direction(), Direction::XToY);
    }

    #[test]
    fn thousand_distinct_causes_score_finite() {
        let x: Vec<u32> = (0..1000).collect();
        let y: Vec<u32> = x.iter().map(|v| v % 5).collect();
        let scores = cisc(&x, &y).unwrap();
        assert!(scores.x_to_y.is_finite() && scores.y_to_x.is_finite());
        assert!(scores.x_to_y < scores.y_to_x, "{scores:?}");
        assert_eq!(scores.direction(), Direction::XToY);
        assert!(serde_json::to_string(&scores).unwrap().contains("x_to_y"));
    }

    #[test]
    fn report_terms_add_up() {
        let x = ["a", "b", "a", "c", "a", "b"];
        let y = [1, 1, 2, 2, 1, 1];
        let r = CiscScorer::new().report(&x, &y).unwrap();
        assert_eq!(r.samples, 6);
        assert_eq!(r.scores.x_to_y, r.marginal_x + r.conditional_y_given_x);
        assert_eq!(r.scores.y_to_x, r.marginal_y + r.conditional_x_given_y);
        assert_eq!(r.confidence, r.scores.confidence());
    }

    #[test]
    fn swapping_inputs_swaps_scores() {
        let x = [1, 1, 2, 3, 3, 3, 2, 1];
        let y = [0, 0, 1, 1, 1, 1, 0, 0];
        let fwd = cisc(&x, &y).unwrap();
        let rev = cisc(&y, &x).unwrap();
        assert_eq!(fwd.x_to_y, rev.y_to_x);
        assert_eq!(fwd.y_to_x, rev.x_to_y);
    }

    #[test]
    fn mismatched_lengths_are_invalid_input() {
        let err = cisc(&[1], &[1, 2]).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(err, Error::LengthMismatch { x_len: 1, y_len: 2 }));
    }

    #[test]
    fn empty_is_invalid_input() {
        let empty: [u8; 0] = [];
        assert!(cisc(&empty, &empty).unwrap_err().is_invalid_input());
    }

    #[test]
    fn builder_keeps_settings() {
        let scorer = CiscScorer::new().with_precision(12).with_parallel_cells(true);
        assert_eq!(scorer.precision_digits(), 12);
        let scorer = scorer.with_precision(8);
        assert_eq!(scorer.precision_digits(), 8);
    }

    #[test]
    fn from_config_uses_precision() {
        let mut config = ScoringConfig::default();
        config.precision_digits = 7;
        assert_eq!(CiscScorer::from_config(&config).precision_digits(), 7);
    }
}
