//! # Primal simplex iterations
//!
//! The pivot loop shared by both phases: price, select an entering column, run the ratio test and
//! update the basis, until no improving column remains.
use log::trace;
use rand::Rng;

use crate::algorithm::error::SolveError;
use crate::algorithm::two_phase::column_source::ColumnSource;
use crate::algorithm::two_phase::config::SolverConfig;
use crate::algorithm::two_phase::strategy::inspection_order::InspectionOrder;
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::algorithm::two_phase::tableau::Tableau;

/// How a run of the primal simplex method ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PrimalResult {
    /// No column has a sufficiently negative relative cost.
    Optimal,
    /// The contained entering column can be increased without bound.
    Unbounded(usize),
    /// An improving column was still found after the maximum number of pivots.
    TooManySteps,
    /// The early exit predicate accepted the basis.
    EarlyExit,
}

/// Predicate over the basis, evaluated after each pivot.
pub type EarlyExit<'a> = &'a mut dyn FnMut(&[usize]) -> bool;

/// Reduces the cost of the basic feasible solution to the minimum.
///
/// The tableau should hold a primal feasible basis.
///
/// # Arguments
///
/// * `tableau`: Starting basis, modified in place.
/// * `rule`: Selects the entering column.
/// * `order`: Order in which columns are inspected, covering all columns of the tableau.
/// * `rng`: Used to reshuffle the inspection order.
/// * `config`: Tolerances, reshuffling, refactoring and verbosity.
/// * `max_rounds`: Maximum number of pivots.
/// * `early_exit`: Optional predicate; when it returns `true` for the basis after a pivot, the
/// method stops.
///
/// # Return value
///
/// How the method ended, the final basis is in the tableau. An error only when the basis inverse
/// couldn't be recomputed.
pub fn primal<S, PR, IO, R>(
    tableau: &mut Tableau<S>,
    rule: &mut PR,
    order: &mut IO,
    rng: &mut R,
    config: &SolverConfig,
    max_rounds: usize,
    mut early_exit: Option<EarlyExit>,
) -> Result<PrimalResult, SolveError>
where
    S: ColumnSource + ?Sized,
    PR: PivotRule,
    IO: InspectionOrder,
    R: Rng + ?Sized,
{
    let mut nr_pivots = 0;
    loop {
        order.start_pass();
        if config.reshuffle {
            order.shuffle(rng);
        }

        let dual = tableau.left_basis_solution();
        let basic_values = tableau.basic_values();

        let Some((column_index, cost)) = rule.select_primal_pivot_column(
            tableau, &dual, order, config.entering_tolerance,
        ) else {
            break Ok(PrimalResult::Optimal);
        };
        if nr_pivots >= max_rounds {
            break Ok(PrimalResult::TooManySteps);
        }

        let column = tableau.generate_column(column_index);
        let Some(row_index) = tableau.select_primal_pivot_row(
            &basic_values, &column, config.leaving_tolerance,
        ) else {
            break Ok(PrimalResult::Unbounded(column_index));
        };

        let leaving = tableau.bring_into_basis(row_index, column_index, &column);
        nr_pivots += 1;
        if config.verbosity >= 2 {
            trace!(
                "pivot {}: column {} enters at row {} with relative cost {}, column {} leaves",
                nr_pivots, column_index, row_index, cost, leaving,
            );
        }

        if let Some(period) = config.refactor_period {
            if period > 0 && nr_pivots % period == 0 {
                tableau.refactor()?;
            }
        }

        if let Some(predicate) = early_exit.as_mut() {
            if predicate(tableau.basis()) {
                break Ok(PrimalResult::EarlyExit);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::algorithm::two_phase::config::SolverConfig;
    use crate::algorithm::two_phase::primal::{primal, PrimalResult};
    use crate::algorithm::two_phase::strategy::inspection_order::TrackingOrder;
    use crate::algorithm::two_phase::strategy::pivot_rule::{FirstProfitable, SteepestDescentAlongVariable};
    use crate::algorithm::two_phase::tableau::Tableau;
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::data::linear_program::canonical_form::CanonicalForm;

    /// Maximize x0 + x1 with x0 + 2 x1 <= 4 and 3 x0 + x1 <= 6, slacks at 2 and 3.
    fn problem() -> CanonicalForm<DenseMatrix> {
        let constraints = DenseMatrix::new(vec![
            vec![1f64, 2f64, 1f64, 0f64],
            vec![3f64, 1f64, 0f64, 1f64],
        ], 4).unwrap();
        CanonicalForm::new(constraints, vec![4f64, 6f64], vec![-1f64, -1f64, 0f64, 0f64]).unwrap()
    }

    fn run(max_rounds: usize, early_exit: bool) -> (PrimalResult, Vec<f64>) {
        let problem = problem();
        let mut tableau = Tableau::new(&problem, vec![2, 3]).unwrap();
        let mut order = TrackingOrder::new(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = SolverConfig { early_exit, ..SolverConfig::default() };

        let result = if early_exit {
            primal(&mut tableau, &mut FirstProfitable, &mut order, &mut rng, &config, max_rounds, None)
        } else {
            primal(&mut tableau, &mut SteepestDescentAlongVariable, &mut order, &mut rng, &config, max_rounds, None)
        };

        (result.unwrap(), tableau.current_bfs())
    }

    #[test]
    fn optimal() {
        for early_exit in [true, false] {
            let (result, x) = run(100, early_exit);
            assert_eq!(result, PrimalResult::Optimal);
            assert_abs_diff_eq!(x[0], 1.6f64, epsilon = 1e-10);
            assert_abs_diff_eq!(x[1], 1.2f64, epsilon = 1e-10);
        }
    }

    #[test]
    fn refactor_every_pivot() {
        let problem = problem();
        let mut results = Vec::new();
        for refactor_period in [None, Some(1)] {
            let mut tableau = Tableau::new(&problem, vec![2, 3]).unwrap();
            let mut order = TrackingOrder::new(4);
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            let config = SolverConfig { refactor_period, verbosity: 2, ..SolverConfig::default() };

            let result = primal(&mut tableau, &mut FirstProfitable, &mut order, &mut rng, &config, 100, None);
            assert_eq!(result, Ok(PrimalResult::Optimal));
            results.push((tableau.current_bfs(), tableau.into_basis()));
        }

        let (x_default, basis_default) = &results[0];
        let (x_refactored, basis_refactored) = &results[1];
        assert_eq!(basis_default, basis_refactored);
        for (default, refactored) in x_default.iter().zip(x_refactored) {
            assert_abs_diff_eq!(*default, *refactored, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(x_refactored[0], 1.6f64, epsilon = 1e-10);
        assert_abs_diff_eq!(x_refactored[1], 1.2f64, epsilon = 1e-10);
    }

    #[test]
    fn too_many_steps() {
        let (result, x) = run(0, true);
        assert_eq!(result, PrimalResult::TooManySteps);
        assert_eq!(x, vec![0f64, 0f64, 4f64, 6f64]);
    }

    #[test]
    fn unbounded() {
        let constraints = DenseMatrix::new(vec![vec![1f64, -1f64]], 2).unwrap();
        let problem = CanonicalForm::new(constraints, vec![1f64], vec![0f64, -1f64]).unwrap();
        let mut tableau = Tableau::new(&problem, vec![0]).unwrap();
        let mut order = TrackingOrder::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = primal(
            &mut tableau, &mut FirstProfitable, &mut order, &mut rng,
            &SolverConfig::default(), 10, None,
        );
        assert_eq!(result, Ok(PrimalResult::Unbounded(1)));
    }

    #[test]
    fn early_exit_after_first_pivot() {
        let problem = problem();
        let mut tableau = Tableau::new(&problem, vec![2, 3]).unwrap();
        let mut order = TrackingOrder::new(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut nr_calls = 0;
        let mut predicate = |_: &[usize]| {
            nr_calls += 1;
            true
        };

        let result = primal(
            &mut tableau, &mut FirstProfitable, &mut order, &mut rng,
            &SolverConfig::default(), 100, Some(&mut predicate),
        );
        assert_eq!(result, Ok(PrimalResult::EarlyExit));
        assert_eq!(nr_calls, 1);
        assert!(tableau.basis().contains(&0) || tableau.basis().contains(&1));
    }
}
