//! Property-based tests for the directional scorer.

use std::collections::HashSet;

use cisc_core::{
    cisc, conditional_complexity, decide, score_pairs, BatchOptions, CiscScorer, Direction,
    VariablePair,
};
use cisc_math::stochastic_complexity;
use proptest::prelude::*;

/// Aligned pair of small-domain sequences.
fn aligned_pair() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (1usize..150).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..5, n),
            prop::collection::vec(0u8..4, n),
        )
    })
}

/// `X` over a random lookup table of 4 to 8 entries and `Y = table[X]`.
fn functional_pair() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (prop::collection::vec(0u8..3, 4..=8), 50usize..400)
        .prop_flat_map(|(table, n)| {
            let width = table.len() as u8;
            (Just(table), prop::collection::vec(0..width, n))
        })
        .prop_map(|(table, x)| {
            let y = x.iter().map(|&v| table[v as usize]).collect();
            (x, y)
        })
}

fn distinct(values: &[u8]) -> usize {
    values.iter().collect::<HashSet<_>>().len()
}

/// Group `conditioned` by `conditioning` value in first-occurrence order.
fn groups(conditioning: &[u8], conditioned: &[u8]) -> Vec<Vec<u8>> {
    let mut keys: Vec<u8> = Vec::new();
    let mut cells: Vec<Vec<u8>> = Vec::new();
    for (&k, &v) in conditioning.iter().zip(conditioned) {
        match keys.iter().position(|&seen| seen == k) {
            Some(i) => cells[i].push(v),
            None => {
                keys.push(k);
                cells.push(vec![v]);
            }
        }
    }
    cells
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// A variable scored against itself always ties.
    #[test]
    fn self_pair_ties(x in prop::collection::vec(0u8..8, 1..200)) {
        let scores = cisc(&x, &x).unwrap();
        prop_assert_eq!(scores.x_to_y.to_bits(), scores.y_to_x.to_bits());
        prop_assert_eq!(decide(&scores), Direction::Undecided);
    }

    /// Swapping the inputs swaps the two scores exactly.
    #[test]
    fn swap_symmetry((x, y) in aligned_pair()) {
        let fwd = cisc(&x, &y).unwrap();
        let rev = cisc(&y, &x).unwrap();
        prop_assert_eq!(fwd.x_to_y.to_bits(), rev.y_to_x.to_bits());
        prop_assert_eq!(fwd.y_to_x.to_bits(), rev.x_to_y.to_bits());
        prop_assert_eq!(decide(&fwd), decide(&rev).reversed());
    }

    /// The conditional term is exactly the sum of per-cell complexities.
    #[test]
    fn conditional_decomposes((x, y) in aligned_pair()) {
        let total = conditional_complexity(&x, &y).unwrap();
        let by_hand: f64 = groups(&x, &y)
            .iter()
            .map(|cell| stochastic_complexity(cell).unwrap())
            .sum();
        prop_assert_eq!(total.to_bits(), by_hand.to_bits());
    }

    /// Scores are finite and at least the cause's own complexity.
    #[test]
    fn scores_bound_marginals((x, y) in aligned_pair()) {
        let scores = cisc(&x, &y).unwrap();
        prop_assert!(scores.x_to_y.is_finite() && scores.y_to_x.is_finite());
        prop_assert!(scores.x_to_y >= stochastic_complexity(&x).unwrap());
        prop_assert!(scores.y_to_x >= stochastic_complexity(&y).unwrap());
    }

    /// Parallel cell evaluation returns the serial bits.
    #[test]
    fn parallel_cells_match((x, y) in aligned_pair()) {
        let serial = CiscScorer::new().score(&x, &y).unwrap();
        let parallel = CiscScorer::new().with_parallel_cells(true).score(&x, &y).unwrap();
        prop_assert_eq!(serial, parallel);
    }

    /// A many-to-one function of X is recovered as X → Y.
    #[test]
    fn many_to_one_function_points_forward((x, y) in functional_pair()) {
        prop_assume!(distinct(&y) > 1 && distinct(&y) < distinct(&x));
        let scores = cisc(&x, &y).unwrap();
        prop_assert!(scores.x_to_y < scores.y_to_x, "{:?}", scores);
        prop_assert_eq!(decide(&scores), Direction::XToY);
    }

    /// Any length mismatch is an input error, never a score.
    #[test]
    fn mismatch_rejected(x in prop::collection::vec(0u8..3, 1..50), extra in 1usize..5) {
        let mut y = x.clone();
        y.extend(std::iter::repeat(0u8).take(extra));
        let err = cisc(&x, &y).unwrap_err();
        prop_assert!(err.is_invalid_input());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    /// Batch outcomes line up with their inputs regardless of pool use.
    #[test]
    fn batch_preserves_order(pairs in prop::collection::vec(aligned_pair(), 1..24)) {
        let pairs: Vec<VariablePair<u8>> = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| VariablePair::new(format!("p{i}"), x, y))
            .collect();
        let options = BatchOptions {
            scorer: CiscScorer::new(),
            parallel: true,
            min_pairs: 1,
            threads: Some(4),
        };
        let outcomes = score_pairs(&pairs, &options);
        prop_assert_eq!(outcomes.len(), pairs.len());
        for (pair, outcome) in pairs.iter().zip(&outcomes) {
            prop_assert_eq!(&pair.name, &outcome.name);
            let expected = cisc(&pair.x, &pair.y).unwrap();
            prop_assert_eq!(outcome.scores(), Some(&expected));
        }
    }
}
