//! # Solver configuration
//!
//! Tolerances and heuristics of the two-phase method.

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 3_252_351;

/// Tunable parameters of a `Solver`.
///
/// All fields are public; start from `SolverConfig::default()` and override what is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// A column only enters the basis if its relative cost is below minus this value.
    pub entering_tolerance: f64,
    /// Only rows where the entering column exceeds this value take part in the ratio test.
    pub leaving_tolerance: f64,
    /// Lower bound on the tolerance used to check feasibility of a solution.
    pub check_tolerance: f64,
    /// Threshold used to decide linear independence of rows and columns.
    pub min_basis_epsilon: f64,
    /// Take the first improving column instead of the most improving one.
    pub early_exit: bool,
    /// Randomly permute the order in which columns are inspected at the start of each pass.
    pub reshuffle: bool,
    /// Seed of the random number generator used for reshuffling.
    pub seed: u64,
    /// Recompute the basis inverse from scratch after this many pivots.
    pub refactor_period: Option<usize>,
    /// 0 is silent, 1 logs phase transitions, 2 and up also logs each pivot.
    pub verbosity: u8,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            entering_tolerance: 1e-5,
            leaving_tolerance: 1e-7,
            check_tolerance: 1e-8,
            min_basis_epsilon: 1e-5,
            early_exit: true,
            reshuffle: true,
            seed: DEFAULT_SEED,
            refactor_period: Some(100),
            verbosity: 0,
        }
    }
}
