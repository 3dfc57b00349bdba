//! Stochastic complexity of multinomial samples.
//!
//! Numerical core for causal inference by stochastic complexity: the NML
//! regret of a multinomial model, the code length of a discrete sequence,
//! and an exact (factorial-based) oracle for small samples.

pub mod error;
pub mod math;

pub use error::ComplexityError;
pub use math::complexity::{
    complexity_breakdown, complexity_breakdown_with_precision, log2_clamped, stochastic_complexity,
    stochastic_complexity_with_precision, ComplexityBreakdown,
};
pub use math::frequency::FrequencyProfile;
pub use math::oracle::{
    exact_binary_regret, exact_regret, exact_stochastic_complexity, LogFactorialCache,
    MAX_EXACT_SAMPLES,
};
pub use math::regret::{
    log2_regret, log2_regret_with_precision, regret, regret_with_precision, truncation_bound,
    RecurrenceState, DEFAULT_PRECISION_DIGITS,
};
