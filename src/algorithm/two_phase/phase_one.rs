//! # Finding a basic feasible solution
//!
//! If no feasible basis is known, one is searched for by minimizing the sum of artificial
//! variables, one for each row. The artificial variables form a feasible starting basis.
use log::debug;
use rand::Rng;

use crate::algorithm::error::SolveError;
use crate::algorithm::two_phase::column_source::ColumnSource;
use crate::algorithm::two_phase::config::SolverConfig;
use crate::algorithm::two_phase::primal::{primal, PrimalResult};
use crate::algorithm::two_phase::strategy::inspection_order::TrackingOrder;
use crate::algorithm::two_phase::strategy::pivot_rule::{FirstProfitable, SteepestDescentAlongVariable};
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::linear_algebra::matrix::Matrix;
use crate::data::linear_algebra::vector::SparseVec;
use crate::data::linear_program::canonical_form::CanonicalForm;

/// Largest artificial objective value for which the problem is considered feasible.
const FEASIBILITY_THRESHOLD: f64 = 1e-5;

/// A problem extended with an artificial unit column for each row.
///
/// Rows with a negative right-hand side are negated, such that the artificial variables are a
/// feasible basis. The original columns keep their indices, artificial variable `i` has index
/// `n + i`. Only the artificial variables have a cost.
struct Artificial<'provider, S: ?Sized> {
    provider: &'provider S,
    /// Right-hand side after negating rows, nonnegative.
    b: Vec<f64>,
    /// Sign applied to each row.
    signs: Vec<f64>,
}

impl<'provider, S: ColumnSource + ?Sized> Artificial<'provider, S> {
    fn new(provider: &'provider S) -> Self {
        let signs = provider.constraint_values().iter()
            .map(|&v| if v < 0_f64 { -1_f64 } else { 1_f64 })
            .collect::<Vec<_>>();
        let b = provider.constraint_values().iter()
            .map(|v| v.abs())
            .collect();

        Self { provider, b, signs }
    }

    fn nr_artificial_variables(&self) -> usize {
        self.provider.nr_rows()
    }

    fn is_artificial(&self, j: usize) -> bool {
        j >= self.provider.nr_columns()
    }
}

impl<S: ColumnSource + ?Sized> ColumnSource for Artificial<'_, S> {
    fn nr_rows(&self) -> usize {
        self.provider.nr_rows()
    }

    fn nr_columns(&self) -> usize {
        self.provider.nr_columns() + self.nr_artificial_variables()
    }

    fn constraint_values(&self) -> &[f64] {
        &self.b
    }

    fn cost_value(&self, j: usize) -> f64 {
        if self.is_artificial(j) { 1_f64 } else { 0_f64 }
    }

    fn column(&self, j: usize) -> SparseVec {
        if self.is_artificial(j) {
            SparseVec::standard_basis_vector(j - self.provider.nr_columns(), self.nr_rows())
        } else {
            self.provider.column(j).scale(&self.signs)
        }
    }
}

/// Find a primal feasible basis.
///
/// First, a basis is selected from the columns of the constraint matrix directly. If the
/// corresponding solution is not feasible, the artificial problem is solved.
///
/// # Arguments
///
/// * `problem`: Problem with full row rank and at least as many columns as rows.
/// * `config`: Solver configuration.
/// * `rng`: Random number generator for the inspection order.
/// * `tolerance`: Feasibility tolerance.
/// * `max_rounds`: Maximum number of pivots.
///
/// # Return value
///
/// A basis of the original problem of which the basic solution is feasible.
/// `SolveError::Infeasible` if no such basis exists.
pub fn feasible_basis<M, R>(
    problem: &CanonicalForm<M>,
    config: &SolverConfig,
    rng: &mut R,
    tolerance: f64,
    max_rounds: usize,
) -> Result<Vec<usize>, SolveError>
where
    M: Matrix,
    R: Rng + ?Sized,
{
    let m = problem.nr_rows();
    let n = problem.nr_columns();

    let crash = problem.constraints().col_basis(&[], config.min_basis_epsilon);
    if crash.len() == m {
        let feasible = problem.basic_solution(&crash)
            .is_ok_and(|x| problem.check_primal_feasibility(&x, tolerance).is_ok());
        if feasible {
            if config.verbosity >= 1 {
                debug!("initial column basis is feasible, skipping artificial problem");
            }
            return Ok(crash);
        }
    }

    if config.verbosity >= 1 {
        debug!("phase one: {} artificial variables", m);
    }
    let artificial = Artificial::new(problem);
    let mut tableau = Tableau::with_identity_basis(&artificial, (n..(n + m)).collect());
    let mut order = TrackingOrder::new(artificial.nr_columns());
    // Once all artificial variables left the basis, the artificial cost is zero
    let mut no_artificial_basic = |basis: &[usize]| basis.iter().all(|&j| j < n);

    let result = if config.early_exit {
        primal(&mut tableau, &mut FirstProfitable, &mut order, rng, config, max_rounds, Some(&mut no_artificial_basic))
    } else {
        primal(&mut tableau, &mut SteepestDescentAlongVariable, &mut order, rng, config, max_rounds, Some(&mut no_artificial_basic))
    }?;
    match result {
        PrimalResult::Optimal | PrimalResult::EarlyExit => {},
        PrimalResult::Unbounded(_) => return Err(SolveError::InternalError(
            "artificial objective is bounded but simplex reported unbounded".to_string(),
        )),
        PrimalResult::TooManySteps => return Err(SolveError::TooManySteps(max_rounds)),
    }

    let x = tableau.current_bfs();
    let artificial_cost = x[n..].iter().sum::<f64>();
    if artificial_cost > FEASIBILITY_THRESHOLD {
        return Err(SolveError::Infeasible(format!(
            "artificial objective value {} is positive at optimality", artificial_cost,
        )));
    }

    let basis = tableau.into_basis();
    if let Some(&j) = basis.iter().find(|&&j| j >= n && x[j].abs() > FEASIBILITY_THRESHOLD) {
        return Err(SolveError::InternalError(format!(
            "artificial variable {} is basic with value {}", j - n, x[j],
        )));
    }
    if basis.iter().all(|&j| j < n) {
        return Ok(basis);
    }

    // Artificial variables remain in the basis at zero level, complete the original columns
    let original = basis.into_iter().filter(|&j| j < n).collect::<Vec<_>>();
    if config.verbosity >= 1 {
        debug!("replacing {} degenerate artificial basis columns", m - original.len());
    }
    let completed = problem.constraints().col_basis(&original, config.min_basis_epsilon);
    if completed.len() != m {
        return Err(SolveError::InternalError(
            "basis couldn't move off artificial variables".to_string(),
        ));
    }

    Ok(completed)
}
