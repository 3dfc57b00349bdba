//! CISC core library.
//!
//! Scores the causal direction between two discrete variables observed as
//! paired samples. Each direction is the total code length of describing
//! the cause on its own plus the effect given the cause, measured by the
//! stochastic complexity of the multinomial model class. The shorter total
//! is the hypothesized causal direction.
//!
//! - [`conditional`]: partition one sequence by another and sum per-cell complexities
//! - [`scorer`]: the directional score pair
//! - [`decision`]: direction decisions, accuracy tallies, decision-rate curves
//! - [`batch`]: scoring many independent pairs on a worker pool
//!
//! The binary entry point is in `main.rs`.

pub mod batch;
pub mod conditional;
pub mod decision;
pub mod exit_codes;
pub mod input;
pub mod logging;
pub mod scorer;
pub mod symbol;

pub use batch::{
    score_pairs, summarize, BatchOptions, BatchSummary, PairOutcome, PairResult, VariablePair,
};
pub use conditional::{conditional_complexity, CellComplexity, ConditionalAggregator, Partition};
pub use decision::{decide, decision_rate_curve, DecisionRatePoint, DecisionTally, Direction};
pub use scorer::{cisc, CiscReport, CiscScorer, ScorePair};
pub use symbol::Symbol;
