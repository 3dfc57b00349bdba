//! Property-based tests for cisc-math.
//!
//! Uses proptest to check the code-length invariants across random samples.

use cisc_math::{
    exact_regret, log2_regret, regret, stochastic_complexity, truncation_bound, FrequencyProfile,
    LogFactorialCache, DEFAULT_PRECISION_DIGITS,
};
use proptest::prelude::*;

/// Relative tolerance for recurrence vs enumeration.
const ORACLE_TOL: f64 = 1e-6;

fn small_sequence() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..6, 1..200)
}

// ============================================================================
// stochastic complexity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Repeated calls give the same bits.
    #[test]
    fn complexity_deterministic(seq in small_sequence()) {
        let a = stochastic_complexity(&seq).unwrap();
        let b = stochastic_complexity(&seq).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    /// Code lengths are never negative.
    #[test]
    fn complexity_non_negative(seq in small_sequence()) {
        let sc = stochastic_complexity(&seq).unwrap();
        prop_assert!(sc >= 0.0, "sc={} for {:?}", sc, seq);
        prop_assert!(sc.is_finite());
    }

    /// A sequence of one repeated symbol costs nothing.
    #[test]
    fn complexity_singleton_domain(symbol in any::<i64>(), n in 1usize..5000) {
        let seq = vec![symbol; n];
        prop_assert_eq!(stochastic_complexity(&seq).unwrap(), 0.0);
    }

    /// Permuting the sample does not change its code length beyond rounding.
    #[test]
    fn complexity_order_insensitive(seq in small_sequence()) {
        let mut sorted = seq.clone();
        sorted.sort_unstable();
        let a = stochastic_complexity(&seq).unwrap();
        let b = stochastic_complexity(&sorted).unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0), "{} vs {}", a, b);
    }

    /// Profile counts always add up to the sample size.
    #[test]
    fn profile_counts_sum(seq in small_sequence()) {
        let profile = FrequencyProfile::from_sequence(&seq).unwrap();
        prop_assert_eq!(profile.counts().iter().sum::<usize>(), seq.len());
        prop_assert!(profile.domain_size() >= 1);
    }
}

// ============================================================================
// regret
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Recurrence and exact enumeration agree for small models.
    #[test]
    fn regret_matches_oracle(l in 1usize..=4, n in 1usize..=12) {
        let mut cache = LogFactorialCache::new();
        let exact = exact_regret(l, n, &mut cache).unwrap();
        let fast = regret(l, n).unwrap();
        let rel = (exact - fast).abs() / exact;
        prop_assert!(rel <= ORACLE_TOL, "C({},{}) exact={} fast={}", l, n, exact, fast);
    }

    /// The regret is at least one, so its log2 is non-negative.
    #[test]
    fn regret_at_least_one(l in 1usize..64, n in 1usize..20_000) {
        let c = regret(l, n).unwrap();
        prop_assert!(c >= 1.0);
        prop_assert!(c.is_finite());
    }

    /// Past the `f64` range the log2 regret stays finite and keeps growing.
    #[test]
    fn log2_regret_finite_for_wide_domains(l in 2usize..5000, n in 1usize..5000) {
        let bits = log2_regret(l, n).unwrap();
        prop_assert!(bits.is_finite() && bits > 0.0);
        prop_assert!(log2_regret(l + 1, n).unwrap() > bits);
        if let Ok(plain) = regret(l, n) {
            prop_assert!((bits - plain.log2()).abs() <= 1e-9 * bits);
        }
    }

    /// Adding samples never lowers the binary regret.
    #[test]
    fn binary_regret_grows_with_samples(n in 1usize..5000) {
        prop_assert!(regret(2, n + 1).unwrap() >= regret(2, n).unwrap());
    }

    /// The truncation bound covers every non-zero term for small n.
    #[test]
    fn truncation_bound_covers_small_samples(n in 1usize..=40) {
        prop_assert!(truncation_bound(n, DEFAULT_PRECISION_DIGITS) >= n);
    }
}
