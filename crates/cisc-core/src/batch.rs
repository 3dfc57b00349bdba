//! Scoring many independent variable pairs.
//!
//! Pairs share no state, so a batch maps one-to-one onto outcomes. Large
//! batches go through a rayon pool; the indexed collect keeps outcomes in
//! input order either way. A pair that fails validation yields a failed
//! outcome carrying its error report, and the rest of the batch still runs.

use std::hash::Hash;

use cisc_common::{ErrorReport, Result};
use cisc_config::ScoringConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::decision::{decision_rate_curve, DecisionRatePoint, DecisionTally, Direction};
use crate::scorer::{CiscScorer, ScorePair};

/// Two aligned observation sequences with an optional known direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariablePair<T> {
    #[serde(default)]
    pub name: String,
    pub x: Vec<T>,
    pub y: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truth: Option<Direction>,
}

impl<T> VariablePair<T> {
    pub fn new(name: impl Into<String>, x: Vec<T>, y: Vec<T>) -> Self {
        VariablePair {
            name: name.into(),
            x,
            y,
            truth: None,
        }
    }

    pub fn with_truth(mut self, truth: Direction) -> Self {
        self.truth = Some(truth);
        self
    }
}

/// How a batch is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub scorer: CiscScorer,
    /// Use a worker pool for batches of at least `min_pairs`.
    pub parallel: bool,
    pub min_pairs: usize,
    /// Pool size; `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions::from_config(&ScoringConfig::default())
    }
}

impl BatchOptions {
    pub fn from_config(config: &ScoringConfig) -> Self {
        BatchOptions {
            scorer: CiscScorer::from_config(config),
            parallel: config.parallel.enabled,
            min_pairs: config.parallel.min_pairs,
            threads: config.parallel.threads,
        }
    }

    pub fn serial(scorer: CiscScorer) -> Self {
        BatchOptions {
            scorer,
            parallel: false,
            min_pairs: 1,
            threads: None,
        }
    }

    fn use_pool(&self, pairs: usize) -> bool {
        self.parallel && pairs >= self.min_pairs.max(1)
    }
}

/// Result for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairResult {
    Scored {
        scores: ScorePair,
        direction: Direction,
        confidence: f64,
    },
    Failed {
        error: ErrorReport,
    },
}

/// One pair's name, known direction and result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth: Option<Direction>,
    #[serde(flatten)]
    pub result: PairResult,
}

impl PairOutcome {
    fn new<T>(pair: &VariablePair<T>, scored: Result<ScorePair>) -> Self {
        let result = match scored {
            Ok(scores) => PairResult::Scored {
                scores,
                direction: scores.direction(),
                confidence: scores.confidence(),
            },
            Err(err) => {
                debug!(pair = %pair.name, code = err.code(), "pair failed");
                PairResult::Failed {
                    error: err.report(),
                }
            }
        };
        PairOutcome {
            name: pair.name.clone(),
            truth: pair.truth,
            result,
        }
    }

    pub fn scores(&self) -> Option<&ScorePair> {
        match &self.result {
            PairResult::Scored { scores, .. } => Some(scores),
            PairResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        match &self.result {
            PairResult::Scored { .. } => None,
            PairResult::Failed { error } => Some(error),
        }
    }

    pub fn is_scored(&self) -> bool {
        self.scores().is_some()
    }
}

fn score_one<T: Eq + Hash + Sync>(scorer: &CiscScorer, pair: &VariablePair<T>) -> PairOutcome {
    PairOutcome::new(pair, scorer.score(&pair.x, &pair.y))
}

fn score_serial<T: Eq + Hash + Sync>(
    pairs: &[VariablePair<T>],
    scorer: &CiscScorer,
) -> Vec<PairOutcome> {
    pairs.iter().map(|pair| score_one(scorer, pair)).collect()
}

fn score_parallel<T: Eq + Hash + Sync>(
    pairs: &[VariablePair<T>],
    scorer: &CiscScorer,
) -> Vec<PairOutcome> {
    pairs.par_iter().map(|pair| score_one(scorer, pair)).collect()
}

/// Score every pair, returning outcomes in input order.
pub fn score_pairs<T>(pairs: &[VariablePair<T>], options: &BatchOptions) -> Vec<PairOutcome>
where
    T: Eq + Hash + Sync,
{
    let scorer = &options.scorer;
    if !options.use_pool(pairs.len()) {
        debug!(pairs = pairs.len(), "scoring batch serially");
        return score_serial(pairs, scorer);
    }

    let Some(threads) = options.threads else {
        info!(pairs = pairs.len(), "scoring batch on global pool");
        return score_parallel(pairs, scorer);
    };

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => {
            info!(pairs = pairs.len(), threads, "scoring batch on dedicated pool");
            pool.install(|| score_parallel(pairs, scorer))
        }
        Err(err) => {
            warn!(error = %err, threads, "failed to build worker pool, scoring serially");
            score_serial(pairs, scorer)
        }
    }
}

/// Aggregate view of a scored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub pairs: usize,
    pub scored: usize,
    pub failed: usize,
    /// Scored pairs with a known direction.
    pub labeled: usize,
    pub tally: DecisionTally,
    pub accuracy: f64,
    pub decided_accuracy: f64,
    pub curve: Vec<DecisionRatePoint>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Tally and decision-rate curve over scored pairs with known truth.
pub fn summarize(outcomes: &[PairOutcome], steps: usize) -> BatchSummary {
    let mut tally = DecisionTally::new();
    let mut labeled: Vec<(ScorePair, Direction)> = Vec::new();
    let mut scored = 0;

    for outcome in outcomes {
        let Some(scores) = outcome.scores() else {
            continue;
        };
        scored += 1;
        if let Some(truth) = outcome.truth {
            tally.record(truth, scores.direction());
            labeled.push((*scores, truth));
        }
    }

    BatchSummary {
        pairs: outcomes.len(),
        scored,
        failed: outcomes.len() - scored,
        labeled: labeled.len(),
        tally,
        accuracy: tally.accuracy(),
        decided_accuracy: tally.decided_accuracy(),
        curve: decision_rate_curve(&labeled, steps),
    }
}
