//! Direction decisions and their evaluation against known ground truth.
//!
//! The decision rule is strict: the smaller total wins and exact equality is
//! `Undecided`. Ties are never broken here.
//!
//! For evaluation, outcomes are ranked by confidence (the absolute score
//! gap) and accuracy is reported over the most confident fraction of
//! decisions. An undecided outcome counts as half correct, which is the
//! expected value of breaking the tie with a fair coin.

use serde::{Deserialize, Serialize};

use crate::scorer::ScorePair;

/// Hypothesized causal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// X causes Y.
    XToY,
    /// Y causes X.
    YToX,
    /// Scores tie; no direction preferred.
    Undecided,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::XToY => Direction::YToX,
            Direction::YToX => Direction::XToY,
            Direction::Undecided => Direction::Undecided,
        }
    }

    pub fn is_decided(self) -> bool {
        self != Direction::Undecided
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::XToY => write!(f, "X → Y"),
            Direction::YToX => write!(f, "Y → X"),
            Direction::Undecided => write!(f, "undecided"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x_to_y" | "x->y" | "xy" => Ok(Direction::XToY),
            "y_to_x" | "y->x" | "yx" => Ok(Direction::YToX),
            "undecided" | "tie" => Ok(Direction::Undecided),
            _ => Err(format!("unknown direction: {}", s)),
        }
    }
}

/// Direction implied by a score pair.
pub fn decide(scores: &ScorePair) -> Direction {
    if scores.x_to_y < scores.y_to_x {
        Direction::XToY
    } else if scores.y_to_x < scores.x_to_y {
        Direction::YToX
    } else {
        Direction::Undecided
    }
}

/// Credit of one decision against the truth: 1, 0, or 0.5 when undecided.
fn credit(truth: Direction, inferred: Direction) -> f64 {
    match inferred {
        Direction::Undecided => 0.5,
        d if d == truth => 1.0,
        _ => 0.0,
    }
}

/// Running count of correct, wrong and undecided inferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTally {
    pub correct: usize,
    pub wrong: usize,
    pub undecided: usize,
}

impl DecisionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one inference. A decided inference against an `Undecided`
    /// truth counts as wrong.
    pub fn record(&mut self, truth: Direction, inferred: Direction) {
        match inferred {
            Direction::Undecided => self.undecided += 1,
            d if d == truth => self.correct += 1,
            _ => self.wrong += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.wrong + self.undecided
    }

    /// Correct over all inferences; 0 when empty.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total())
    }

    /// Correct over decided inferences; 0 when nothing was decided.
    pub fn decided_accuracy(&self) -> f64 {
        ratio(self.correct, self.correct + self.wrong)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl std::ops::AddAssign for DecisionTally {
    fn add_assign(&mut self, other: Self) {
        self.correct += other.correct;
        self.wrong += other.wrong;
        self.undecided += other.undecided;
    }
}

/// Accuracy over the most confident `rate` fraction of decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionRatePoint {
    pub rate: f64,
    /// Number of outcomes included at this rate.
    pub decisions: usize,
    pub accuracy: f64,
}

/// Decision rate versus accuracy for `(scores, truth)` outcomes.
///
/// Outcomes are sorted by descending confidence; equal confidences keep
/// input order. For `i = 1..=steps` the point at rate `i / steps` covers the
/// first `max(1, floor(i * n / steps))` outcomes. Empty input or zero steps
/// yields no points.
pub fn decision_rate_curve(
    outcomes: &[(ScorePair, Direction)],
    steps: usize,
) -> Vec<DecisionRatePoint> {
    let n = outcomes.len();
    if n == 0 || steps == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(f64, f64)> = outcomes
        .iter()
        .map(|(scores, truth)| (scores.confidence(), credit(*truth, scores.direction())))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    // Prefix sums of credit so every point is O(1).
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    for (_, c) in &ranked {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + c);
    }

    (1..=steps)
        .map(|i| {
            let decisions = (i * n / steps).max(1);
            DecisionRatePoint {
                rate: i as f64 / steps as f64,
                decisions,
                accuracy: prefix[decisions] / decisions as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(x_to_y: f64, y_to_x: f64) -> ScorePair {
        ScorePair { x_to_y, y_to_x }
    }

    #[test]
    fn smaller_total_wins() {
        assert_eq!(decide(&pair(10.0, 12.0)), Direction::XToY);
        assert_eq!(decide(&pair(12.0, 10.0)), Direction::YToX);
    }

    #[test]
    fn exact_tie_is_undecided() {
        assert_eq!(decide(&pair(7.5, 7.5)), Direction::Undecided);
    }

    #[test]
    fn nan_is_never_a_decision() {
        assert_eq!(decide(&pair(f64::NAN, 1.0)), Direction::Undecided);
    }

    #[test]
    fn parse_directions() {
        assert_eq!("x_to_y".parse::<Direction>().unwrap(), Direction::XToY);
        assert_eq!("Y->X".parse::<Direction>().unwrap(), Direction::YToX);
        assert_eq!("tie".parse::<Direction>().unwrap(), Direction::Undecided);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Direction::XToY).unwrap(), "\"x_to_y\"");
        assert_eq!(
            serde_json::from_str::<Direction>("\"y_to_x\"").unwrap(),
            Direction::YToX
        );
    }

    #[test]
    fn reversed_round_trip() {
        for d in [Direction::XToY, Direction::YToX, Direction::Undecided] {
            assert_eq!(d.reversed().reversed(), d);
        }
        assert!(!Direction::Undecided.is_decided());
    }

    #[test]
    fn tally_counts() {
        let mut tally = DecisionTally::new();
        tally.record(Direction::XToY, Direction::XToY);
        tally.record(Direction::XToY, Direction::YToX);
        tally.record(Direction::YToX, Direction::Undecided);
        tally.record(Direction::YToX, Direction::YToX);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.correct, 2);
        assert_eq!(tally.wrong, 1);
        assert_eq!(tally.undecided, 1);
        assert_eq!(tally.accuracy(), 0.5);
        assert!((tally.decided_accuracy() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_tally_has_zero_accuracy() {
        let tally = DecisionTally::new();
        assert_eq!(tally.accuracy(), 0.0);
        assert_eq!(tally.decided_accuracy(), 0.0);
    }

    #[test]
    fn tallies_add() {
        let mut a = DecisionTally {
            correct: 1,
            wrong: 2,
            undecided: 3,
        };
        a += DecisionTally {
            correct: 4,
            wrong: 0,
            undecided: 1,
        };
        assert_eq!(
            a,
            DecisionTally {
                correct: 5,
                wrong: 2,
                undecided: 4
            }
        );
    }

    #[test]
    fn curve_ranks_by_confidence() {
        let outcomes = vec![
            (pair(10.0, 11.0), Direction::YToX), // gap 1, wrong
            (pair(10.0, 20.0), Direction::XToY), // gap 10, correct
            (pair(5.0, 5.0), Direction::XToY),   // gap 0, undecided
            (pair(30.0, 25.0), Direction::YToX), // gap 5, correct
        ];
        let curve = decision_rate_curve(&outcomes, 4);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].decisions, 1);
        assert_eq!(curve[0].accuracy, 1.0);
        assert_eq!(curve[1].decisions, 2);
        assert_eq!(curve[1].accuracy, 1.0);
        assert_eq!(curve[2].decisions, 3);
        assert!((curve[2].accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(curve[3].decisions, 4);
        assert_eq!(curve[3].accuracy, 2.5 / 4.0);
        assert_eq!(curve[3].rate, 1.0);
    }

    #[test]
    fn curve_with_more_steps_than_outcomes() {
        let outcomes = vec![(pair(1.0, 2.0), Direction::XToY)];
        let curve = decision_rate_curve(&outcomes, 10);
        assert_eq!(curve.len(), 10);
        assert!(curve.iter().all(|p| p.decisions == 1 && p.accuracy == 1.0));
    }

    #[test]
    fn curve_empty_inputs() {
        assert!(decision_rate_curve(&[], 10).is_empty());
        assert!(decision_rate_curve(&[(pair(1.0, 2.0), Direction::XToY)], 0).is_empty());
    }
}
