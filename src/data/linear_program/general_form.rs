//! # Linear programs in "general form"
//!
//! Nonnegative variables with equality and inequality constraints, in either optimization
//! direction. Problems in this form are converted to canonical form by adding a slack variable
//! for each inequality.
use itertools::Itertools;

use crate::algorithm::error::SolveError;
use crate::algorithm::two_phase::Solver;
use crate::data::linear_algebra::{SparseTuple, StructureError};
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_algebra::vector::inner_product;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::{ConstraintType, Objective};

/// A linear program in general form.
///
/// All variables are bounded below by zero and have no upper bound; upper bounds can be added as
/// `ConstraintType::Less` constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralForm {
    /// Which direction does the objective function go?
    objective: Objective,
    /// Cost coefficient for each variable, in the direction of `objective`.
    cost: Vec<f64>,
    /// Rows as `(coefficients, relation, right-hand side)`.
    ///
    /// Coefficients are sorted by variable index. The constraint reads "from constraint to
    /// constraint value", e.g. `<a, x> <= b` for `ConstraintType::Less`.
    constraints: Vec<(Vec<SparseTuple<f64>>, ConstraintType, f64)>,
}

/// Solution of a problem in general form.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralSolution {
    /// Value of each of the original variables, without slacks.
    pub values: Vec<f64>,
    /// Objective value in the direction of the problem.
    pub objective_value: f64,
    /// Shadow price of each constraint.
    ///
    /// The change in objective value per unit increase of the right-hand side, for both
    /// optimization directions.
    pub dual: Vec<f64>,
}

impl GeneralForm {
    /// Create a new problem without constraints.
    ///
    /// # Arguments
    ///
    /// * `objective`: Whether to minimize or maximize.
    /// * `cost`: Cost coefficient for each variable, this determines the number of variables.
    pub fn new(objective: Objective, cost: Vec<f64>) -> Self {
        Self {
            objective,
            cost,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: `(variable index, coefficient)` tuples in any order, each variable at
    /// most once.
    /// * `constraint_type`: Relation between the left-hand side and `rhs`.
    /// * `rhs`: Right-hand side value.
    pub fn add_constraint(
        &mut self,
        coefficients: Vec<SparseTuple<f64>>,
        constraint_type: ConstraintType,
        rhs: f64,
    ) -> Result<(), StructureError> {
        let coefficients = coefficients.into_iter()
            .sorted_by_key(|&(j, _)| j)
            .collect::<Vec<_>>();

        if let Some(&(index, _)) = coefficients.last() {
            if index >= self.nr_variables() {
                return Err(StructureError::IndexOutOfBounds { index, dim: self.nr_variables() });
            }
        }
        if let Some(position) = coefficients.iter()
            .tuple_windows()
            .position(|((first, _), (second, _))| first == second) {
            return Err(StructureError::Unsorted { position: position + 1 });
        }

        self.constraints.push((coefficients, constraint_type, rhs));
        Ok(())
    }

    /// The number of variables, without slacks.
    pub fn nr_variables(&self) -> usize {
        self.cost.len()
    }

    /// The number of constraints.
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Convert to a minimization problem with equality constraints.
    ///
    /// The original variables keep their indices. The slack variable of the `k`-th inequality has
    /// index `nr_variables + k`.
    pub fn derive_canonical_form(&self) -> Result<CanonicalForm<ColumnMajor>, SolveError> {
        let nr_rows = self.nr_constraints();
        let mut columns = vec![Vec::new(); self.nr_variables()];
        for (i, (coefficients, _, _)) in self.constraints.iter().enumerate() {
            for &(j, value) in coefficients {
                if value != 0_f64 {
                    columns[j].push((i, value));
                }
            }
        }

        let slack_columns = self.constraints.iter()
            .enumerate()
            .filter_map(|(i, (_, constraint_type, _))| {
                constraint_type.slack_coefficient().map(|coefficient| vec![(i, coefficient)])
            });
        columns.extend(slack_columns);
        let nr_slacks = columns.len() - self.nr_variables();

        let sign = self.objective.sign();
        let cost = self.cost.iter()
            .map(|&c| sign * c)
            .chain(std::iter::repeat_n(0_f64, nr_slacks))
            .collect();
        let b = self.constraints.iter().map(|&(_, _, rhs)| rhs).collect();

        CanonicalForm::new(ColumnMajor::new(columns, nr_rows)?, b, cost)
    }

    /// Solve this problem.
    ///
    /// # Arguments
    ///
    /// * `solver`: Solver to use on the canonical form.
    /// * `tolerance`: Feasibility tolerance, see `Solver::solve`.
    /// * `max_rounds`: Maximum number of pivots in each phase.
    pub fn solve(
        &self,
        solver: &Solver,
        tolerance: f64,
        max_rounds: usize,
    ) -> Result<GeneralSolution, SolveError> {
        let canonical = self.derive_canonical_form()?;
        let (mut x, _, dual) = solver.solve(&canonical, None, tolerance, max_rounds)?.into_parts();

        x.truncate(self.nr_variables());
        let objective_value = inner_product(&self.cost, &x);
        let sign = self.objective.sign();
        let dual = dual.unwrap_or_else(|| vec![0_f64; self.nr_constraints()])
            .into_iter()
            .map(|y| sign * y)
            .collect();

        Ok(GeneralSolution { values: x, objective_value, dual })
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::error::SolveError;
    use crate::algorithm::two_phase::Solver;
    use crate::data::linear_algebra::StructureError;
    use crate::data::linear_algebra::matrix::Matrix;
    use crate::data::linear_program::elements::{ConstraintType, Objective};
    use crate::data::linear_program::general_form::GeneralForm;

    #[test]
    fn add_constraint() {
        let mut general = GeneralForm::new(Objective::Minimize, vec![1f64, 2f64]);
        assert!(general.add_constraint(vec![(1, 1f64), (0, 2f64)], ConstraintType::Equal, 1f64).is_ok());
        assert_eq!(
            general.add_constraint(vec![(2, 1f64)], ConstraintType::Less, 1f64),
            Err(StructureError::IndexOutOfBounds { index: 2, dim: 2 }),
        );
        assert_eq!(
            general.add_constraint(vec![(1, 1f64), (1, 3f64)], ConstraintType::Less, 1f64),
            Err(StructureError::Unsorted { position: 1 }),
        );
        assert_eq!(general.nr_constraints(), 1);
    }

    #[test]
    fn derive_canonical_form() {
        let mut general = GeneralForm::new(Objective::Maximize, vec![1f64, 2f64]);
        general.add_constraint(vec![(0, 1f64), (1, 1f64)], ConstraintType::Less, 4f64).unwrap();
        general.add_constraint(vec![(0, 1f64), (1, -1f64)], ConstraintType::Equal, 1f64).unwrap();
        general.add_constraint(vec![(1, 1f64)], ConstraintType::Greater, 1f64).unwrap();

        let canonical = general.derive_canonical_form().unwrap();
        assert_eq!(canonical.nr_rows(), 3);
        assert_eq!(canonical.nr_columns(), 4);
        assert_eq!(canonical.cost(), &[-1f64, -2f64, 0f64, 0f64]);
        assert_eq!(canonical.b(), &[4f64, 1f64, 1f64]);
        assert_eq!(canonical.constraints().column(2).to_dense(), vec![1f64, 0f64, 0f64]);
        assert_eq!(canonical.constraints().column(3).to_dense(), vec![0f64, 0f64, -1f64]);
    }

    #[test]
    fn minimize_with_greater() {
        // min x0 + x1 with x0 + 2 x1 >= 2 and x0 >= 0.5
        let mut general = GeneralForm::new(Objective::Minimize, vec![1f64, 1f64]);
        general.add_constraint(vec![(0, 1f64), (1, 2f64)], ConstraintType::Greater, 2f64).unwrap();
        general.add_constraint(vec![(0, 1f64)], ConstraintType::Greater, 0.5f64).unwrap();

        let solution = general.solve(&Solver::default(), 1e-8, 1000).unwrap();
        assert_abs_diff_eq!(solution.values[0], 0.5f64, epsilon = 1e-8);
        assert_abs_diff_eq!(solution.values[1], 0.75f64, epsilon = 1e-8);
        assert_abs_diff_eq!(solution.objective_value, 1.25f64, epsilon = 1e-8);
        assert_abs_diff_eq!(solution.dual[0], 0.5f64, epsilon = 1e-8);
        assert_abs_diff_eq!(solution.dual[1], 0.5f64, epsilon = 1e-8);
    }

    #[test]
    fn unbounded_maximization() {
        let mut general = GeneralForm::new(Objective::Maximize, vec![1f64, 0f64]);
        general.add_constraint(vec![(0, 1f64), (1, -1f64)], ConstraintType::Less, 1f64).unwrap();

        assert!(matches!(general.solve(&Solver::default(), 1e-8, 1000), Err(SolveError::Unbounded(_))));
    }
}
