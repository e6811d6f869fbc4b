//! # The Simplex algorithm
//!
//! This module contains all data structures and logic specific to the two-phase revised simplex
//! method. Degenerate problem shapes are handled before any pivoting: problems without any
//! linearly independent rows, redundant rows and problems without freedom left after removing
//! redundant rows. The first phase finds a feasible basis if none was given, the second phase
//! optimizes from there. Each result is verified against the problem before it is returned.
use std::borrow::Cow;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::algorithm::error::SolveError;
use crate::algorithm::two_phase::column_source::ColumnSource;
use crate::algorithm::two_phase::config::SolverConfig;
use crate::algorithm::two_phase::primal::{EarlyExit, primal, PrimalResult};
use crate::algorithm::two_phase::strategy::inspection_order::TrackingOrder;
use crate::algorithm::two_phase::strategy::pivot_rule::{FirstProfitable, SteepestDescentAlongVariable};
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::linear_algebra::matrix::Matrix;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::solution::Solution;

pub mod column_source;
pub mod config;
pub mod phase_one;
pub mod primal;
pub mod strategy;
pub mod tableau;

/// Solves linear programs in canonical form.
///
/// A solver holds only configuration; each solve creates its own basis, inspection order and
/// random number generator. Solving the same problem twice with the same configuration takes the
/// same pivots.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a new solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The configuration used.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Minimize `c^T x` subject to `A x = b` and `x >= 0`.
    ///
    /// # Arguments
    ///
    /// * `problem`: Problem with no more rows than columns.
    /// * `warm_start`: Optional basis to start from, one column per linearly independent row. It
    /// is ignored if it is not a feasible basis.
    /// * `tolerance`: Feasibility tolerance used to verify solutions. Negative or non-finite values
    /// are treated as zero; values below `SolverConfig::check_tolerance` are raised to it.
    /// * `max_rounds`: Maximum number of pivots in each phase.
    ///
    /// # Return value
    ///
    /// An optimal solution with its basis and dual values, or the reason why there is none.
    pub fn solve<M: Matrix>(
        &self,
        problem: &CanonicalForm<M>,
        warm_start: Option<&[usize]>,
        tolerance: f64,
        max_rounds: usize,
    ) -> Result<Solution, SolveError> {
        self.solve_from(problem, warm_start, tolerance, max_rounds, None)
    }

    /// Like `solve`, but stop the second phase as soon as a predicate accepts the basis.
    ///
    /// The predicate is evaluated after each pivot of the second phase with the current basis of
    /// the problem without redundant rows. The solution returned is feasible, but only optimal
    /// if the predicate never accepted.
    pub fn solve_with_early_exit<M: Matrix>(
        &self,
        problem: &CanonicalForm<M>,
        warm_start: Option<&[usize]>,
        tolerance: f64,
        max_rounds: usize,
        early_exit: &mut dyn FnMut(&[usize]) -> bool,
    ) -> Result<Solution, SolveError> {
        self.solve_from(problem, warm_start, tolerance, max_rounds, Some(early_exit))
    }

    /// Run the second phase from a given basis.
    ///
    /// No rows are removed, so the problem should have full row rank.
    ///
    /// # Return value
    ///
    /// `SolveError::Malformed` if the basis is not a valid, primal feasible basis.
    pub fn optimize_from_basis<M: Matrix>(
        &self,
        problem: &CanonicalForm<M>,
        basis: &[usize],
        tolerance: f64,
        max_rounds: usize,
    ) -> Result<Solution, SolveError> {
        let tolerance = self.check_tolerance(tolerance);
        Self::check_shape(problem)?;

        let x = problem.basic_solution(basis)?;
        problem.check_primal_feasibility(&x, tolerance)
            .map_err(|infeasibility| SolveError::Malformed(format!(
                "basis is not primal feasible: {}", infeasibility,
            )))?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let basis = self.phase_two(problem, basis.to_vec(), &mut rng, max_rounds, None)?;
        let rows = (0..problem.nr_rows()).collect::<Vec<_>>();
        self.finish(problem, problem, &rows, basis, tolerance)
    }

    fn solve_from<M: Matrix>(
        &self,
        problem: &CanonicalForm<M>,
        warm_start: Option<&[usize]>,
        tolerance: f64,
        max_rounds: usize,
        early_exit: Option<EarlyExit>,
    ) -> Result<Solution, SolveError> {
        let tolerance = self.check_tolerance(tolerance);
        Self::check_shape(problem)?;
        if self.config.verbosity >= 1 {
            debug!("solving problem with {} rows and {} columns", problem.nr_rows(), problem.nr_columns());
            if self.config.verbosity >= 2 {
                debug!("{}", problem);
            }
        }

        let rows = problem.constraints().row_basis(&[], self.config.min_basis_epsilon);
        if rows.is_empty() {
            return Self::solve_without_constraints(problem, tolerance);
        }

        let reduced_problem = if rows.len() < problem.nr_rows() {
            if self.config.verbosity >= 1 {
                debug!("removing {} redundant rows", problem.nr_rows() - rows.len());
            }
            Cow::Owned(problem.extract_rows(&rows))
        } else {
            Cow::Borrowed(problem)
        };
        let reduced = &*reduced_problem;

        if reduced.nr_rows() >= reduced.nr_columns() {
            return Self::solve_square(problem, reduced, &rows, tolerance);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let warm_start = warm_start.and_then(|basis| {
            match Self::check_warm_start(problem, reduced, basis, tolerance) {
                Ok(()) => Some(basis.to_vec()),
                Err(error) => {
                    if self.config.verbosity >= 1 {
                        debug!("ignoring warm start: {}", error);
                    }
                    None
                },
            }
        });
        let basis = match warm_start {
            Some(basis) => basis,
            None => phase_one::feasible_basis(reduced, &self.config, &mut rng, tolerance, max_rounds)?,
        };
        if rows.len() < problem.nr_rows() {
            // Every solution of the reduced problem gives the same value on the dropped rows
            let x = reduced.basic_solution(&basis)
                .map_err(|error| SolveError::InternalError(format!("feasible basis is unusable: {}", error)))?;
            problem.check_primal_feasibility(&x, tolerance)
                .map_err(|infeasibility| SolveError::Infeasible(format!(
                    "redundant rows are inconsistent: {}", infeasibility,
                )))?;
        }

        let basis = if reduced.is_zero_cost() {
            basis
        } else {
            self.phase_two(reduced, basis, &mut rng, max_rounds, early_exit)?
        };

        self.finish(problem, reduced, &rows, basis, tolerance)
    }

    fn check_tolerance(&self, tolerance: f64) -> f64 {
        let tolerance = if tolerance.is_finite() && tolerance > 0_f64 { tolerance } else { 0_f64 };
        tolerance.max(self.config.check_tolerance)
    }

    fn check_shape<M: Matrix>(problem: &CanonicalForm<M>) -> Result<(), SolveError> {
        if problem.nr_rows() > problem.nr_columns() {
            Err(SolveError::Malformed(format!(
                "{} rows is more than {} columns", problem.nr_rows(), problem.nr_columns(),
            )))
        } else {
            Ok(())
        }
    }

    /// Solve `0 x = b`, `x >= 0`.
    fn solve_without_constraints<M: Matrix>(
        problem: &CanonicalForm<M>,
        tolerance: f64,
    ) -> Result<Solution, SolveError> {
        if let Some(value) = problem.b().iter().find(|v| !(v.abs() <= tolerance)) {
            return Err(SolveError::Infeasible(format!(
                "constraint matrix is zero but right-hand side contains {}", value,
            )));
        }
        if let Some(j) = problem.cost().iter().position(|&c| c < 0_f64) {
            return Err(SolveError::Unbounded(format!(
                "constraint matrix is zero and column {} has negative cost", j,
            )));
        }

        let n = problem.nr_columns();
        Ok(Solution::new(vec![0_f64; n], (0..n).collect()).with_dual(vec![0_f64; problem.nr_rows()]))
    }

    /// Solve a problem of which the independent rows determine `x` completely.
    fn solve_square<M: Matrix>(
        problem: &CanonicalForm<M>,
        reduced: &CanonicalForm<M>,
        rows: &[usize],
        tolerance: f64,
    ) -> Result<Solution, SolveError> {
        let x = reduced.constraints().solve(reduced.b(), false)
            .ok_or_else(|| SolveError::Infeasible("linear system has no solution".to_string()))?;
        reduced.check_primal_feasibility(&x, tolerance)
            .map_err(|infeasibility| SolveError::Infeasible(infeasibility.to_string()))?;
        problem.check_primal_feasibility(&x, tolerance)
            .map_err(|infeasibility| SolveError::Infeasible(infeasibility.to_string()))?;

        let basis = (0..reduced.nr_columns()).collect::<Vec<_>>();
        let dual = Self::dual(reduced, &basis, rows, problem.nr_rows())?;
        let x = x.into_iter().map(|v| v.max(0_f64)).collect();

        Ok(Solution::new(x, basis).with_dual(dual))
    }

    /// Validate a warm start basis of the reduced problem by recomputing the solution.
    ///
    /// The solution is checked against both the reduced and the original problem.
    fn check_warm_start<M: Matrix>(
        problem: &CanonicalForm<M>,
        reduced: &CanonicalForm<M>,
        basis: &[usize],
        tolerance: f64,
    ) -> Result<(), SolveError> {
        let x = reduced.basic_solution(basis)?;
        reduced.check_primal_feasibility(&x, tolerance)
            .and_then(|()| problem.check_primal_feasibility(&x, tolerance))
            .map_err(|infeasibility| SolveError::Malformed(infeasibility.to_string()))
    }

    /// Optimize from a feasible basis.
    fn phase_two<M: Matrix>(
        &self,
        problem: &CanonicalForm<M>,
        basis: Vec<usize>,
        rng: &mut ChaCha8Rng,
        max_rounds: usize,
        early_exit: Option<EarlyExit>,
    ) -> Result<Vec<usize>, SolveError> {
        if self.config.verbosity >= 1 {
            debug!("phase two from basis {:?}", basis);
        }
        let mut tableau = Tableau::new(problem, basis)?;
        let mut order = TrackingOrder::new(ColumnSource::nr_columns(problem));

        let result = if self.config.early_exit {
            primal(&mut tableau, &mut FirstProfitable, &mut order, rng, &self.config, max_rounds, early_exit)
        } else {
            primal(&mut tableau, &mut SteepestDescentAlongVariable, &mut order, rng, &self.config, max_rounds, early_exit)
        }?;
        if self.config.verbosity >= 2 {
            debug!("{}", tableau);
        }

        match result {
            PrimalResult::Optimal | PrimalResult::EarlyExit => Ok(tableau.into_basis()),
            PrimalResult::Unbounded(column) => Err(SolveError::Unbounded(format!(
                "column {} can be increased without bound", column,
            ))),
            PrimalResult::TooManySteps => Err(SolveError::TooManySteps(max_rounds)),
        }
    }

    /// Recompute and verify the solution of a final basis.
    ///
    /// # Arguments
    ///
    /// * `problem`: Problem as given by the caller.
    /// * `reduced`: Problem after removing redundant rows, of which `basis` is a basis.
    /// * `rows`: Rows of `problem` kept in `reduced`.
    fn finish<M: Matrix>(
        &self,
        problem: &CanonicalForm<M>,
        reduced: &CanonicalForm<M>,
        rows: &[usize],
        basis: Vec<usize>,
        tolerance: f64,
    ) -> Result<Solution, SolveError> {
        let x = reduced.basic_solution(&basis)
            .map_err(|error| SolveError::InternalError(format!("final basis is unusable: {}", error)))?;
        reduced.check_primal_feasibility(&x, tolerance)
            .map_err(|infeasibility| SolveError::InternalError(format!(
                "final solution is not feasible: {}", infeasibility,
            )))?;
        problem.check_primal_feasibility(&x, tolerance)
            .map_err(|infeasibility| SolveError::Infeasible(format!(
                "redundant rows are inconsistent: {}", infeasibility,
            )))?;

        let dual = Self::dual(reduced, &basis, rows, problem.nr_rows())?;
        let x = x.into_iter().map(|v| v.max(0_f64)).collect::<Vec<_>>();
        if self.config.verbosity >= 1 {
            debug!("optimal objective value {}", problem.objective_value(&x));
        }

        Ok(Solution::new(x, basis).with_dual(dual))
    }

    /// Dual values `c_B^T B^-1`, expanded to all rows of the original problem.
    fn dual<M: Matrix>(
        reduced: &CanonicalForm<M>,
        basis: &[usize],
        rows: &[usize],
        nr_original_rows: usize,
    ) -> Result<Vec<f64>, SolveError> {
        let basis_costs = basis.iter().map(|&j| reduced.cost()[j]).collect::<Vec<_>>();
        let reduced_dual = reduced.constraints().extract_columns(basis)
            .transpose()
            .solve(&basis_costs, false)
            .ok_or_else(|| SolveError::InternalError("basis matrix is singular".to_string()))?;

        let mut dual = vec![0_f64; nr_original_rows];
        for (&row, value) in rows.iter().zip(reduced_dual) {
            dual[row] = value;
        }

        Ok(dual)
    }
}
