//! # Data structures for Simplex
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon it.
//! The tableau is extended with supplementary data structures for efficiency.
use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FormatResult};

use crate::algorithm::error::SolveError;
use crate::algorithm::two_phase::column_source::ColumnSource;
use crate::algorithm::two_phase::tableau::inverse_maintenance::BasisInverse;
use crate::data::linear_algebra::vector::{inner_product, SparseVec};
use crate::data::linear_program::canonical_form::validate_basis;

pub mod inverse_maintenance;

/// The most high-level data structure that is used by the Simplex algorithm: the Simplex tableau.
///
/// It holds only a reference to the (immutable) problem it solves, but owns the data structures
/// that describe the current solution basis.
#[derive(Debug)]
pub struct Tableau<'provider, S: ?Sized> {
    provider: &'provider S,

    /// Explicit inverse of the basis matrix.
    ///
    /// This attribute changes with a basis change.
    inverse_maintainer: BasisInverse,

    /// Column index of the basis column for each row.
    basis_indices: Vec<usize>,
    /// All columns currently in the basis.
    ///
    /// Could also be derived from `basis_indices`, but is here for faster reading and writing.
    basis_columns: HashSet<usize>,
}

impl<'provider, S> Tableau<'provider, S>
where
    S: ColumnSource + ?Sized,
{
    /// Create a tableau for a basis.
    ///
    /// # Arguments
    ///
    /// * `provider`: Problem being solved.
    /// * `basis`: One distinct column index per row.
    ///
    /// # Return value
    ///
    /// `SolveError::Malformed` if the basis is invalid or singular.
    pub fn new(provider: &'provider S, basis: Vec<usize>) -> Result<Self, SolveError> {
        validate_basis(&basis, provider.nr_rows(), provider.nr_columns())?;
        let inverse_maintainer = BasisInverse::invert(&provider.extract_columns(&basis))
            .ok_or_else(|| SolveError::Malformed("basis matrix is singular".to_string()))?;

        Ok(Self::from_parts(provider, inverse_maintainer, basis))
    }

    /// Create a tableau for a basis of which the basis matrix is known to be the identity.
    pub(crate) fn with_identity_basis(provider: &'provider S, basis: Vec<usize>) -> Self {
        debug_assert!((0..basis.len()).all(|i| {
            provider.column(basis[i]) == SparseVec::standard_basis_vector(i, provider.nr_rows())
        }));

        let inverse_maintainer = BasisInverse::identity(provider.nr_rows());
        Self::from_parts(provider, inverse_maintainer, basis)
    }

    fn from_parts(provider: &'provider S, inverse_maintainer: BasisInverse, basis: Vec<usize>) -> Self {
        let basis_columns = basis.iter().copied().collect();

        Self {
            provider,
            inverse_maintainer,
            basis_indices: basis,
            basis_columns,
        }
    }

    /// Replace the basis and recompute its inverse from scratch, in `O(m^3)` time.
    ///
    /// On failure, the tableau is left unchanged.
    pub fn reset_basis(&mut self, basis: &[usize]) -> Result<(), SolveError> {
        validate_basis(basis, self.nr_rows(), self.nr_columns())?;
        self.inverse_maintainer = BasisInverse::invert(&self.provider.extract_columns(basis))
            .ok_or_else(|| SolveError::Malformed("basis matrix is singular".to_string()))?;
        self.basis_indices = basis.to_vec();
        self.basis_columns = basis.iter().copied().collect();

        Ok(())
    }

    /// Recompute the inverse of the current basis from scratch.
    pub fn refactor(&mut self) -> Result<(), SolveError> {
        let basis = self.basis_indices.clone();
        self.reset_basis(&basis)
            .map_err(|_| SolveError::InternalError("basis became singular".to_string()))
    }

    /// Compute `B^-1 v`.
    pub fn basis_solve_right(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.nr_rows());

        self.inverse_maintainer.left_multiply_dense(v)
    }

    /// Compute `B^-1 v` for a sparse `v`.
    pub fn basis_solve_right_sparse(&self, v: &SparseVec) -> Vec<f64> {
        debug_assert_eq!(v.dim(), self.nr_rows());

        self.inverse_maintainer.left_multiply_by_basis_inverse(v)
    }

    /// Dual values `c_B^T B^-1`.
    pub fn left_basis_solution(&self) -> Vec<f64> {
        let basis_costs = self.basis_indices.iter()
            .map(|&j| self.provider.cost_value(j))
            .collect::<Vec<_>>();

        self.inverse_maintainer.right_multiply_by_basis_inverse(&basis_costs)
    }

    /// Values of the basic variables, `B^-1 b`, clamped at zero from below.
    pub fn basic_values(&self) -> Vec<f64> {
        let mut values = self.basis_solve_right(self.provider.constraint_values());
        values.iter_mut().for_each(|v| *v = v.max(0_f64));

        values
    }

    /// Calculates the relative cost of a column.
    ///
    /// # Arguments
    ///
    /// * `dual`: Dual values for the current basis, see `left_basis_solution`.
    /// * `j`: Index of column to calculate the relative cost for, in range `0` until
    /// `self.nr_columns()`.
    ///
    /// # Return value
    ///
    /// The relative cost `c_j - dual^T a_j`.
    pub fn relative_cost(&self, dual: &[f64], j: usize) -> f64 {
        debug_assert!(j < self.nr_columns());

        self.provider.cost_value(j) - self.provider.column(j).dot(dual)
    }

    /// Column of original problem with respect to the current basis, `B^-1 a_j`.
    pub fn generate_column(&self, j: usize) -> Vec<f64> {
        debug_assert!(j < self.nr_columns());

        self.basis_solve_right_sparse(&self.provider.column(j))
    }

    /// Determine the row to pivot on.
    ///
    /// This is the row with the smallest ratio between the basic value and the column value,
    /// among rows where the column value exceeds the tolerance. The lowest row index wins ties.
    ///
    /// # Arguments
    ///
    /// * `basic_values`: Nonnegative values of the basic variables.
    /// * `column`: Entering column with respect to the current basis, see `generate_column`.
    /// * `tolerance`: Column values up to this value are not considered.
    ///
    /// # Return value
    ///
    /// Index of the row to pivot on. If not found, the problem is unbounded.
    pub fn select_primal_pivot_row(
        &self,
        basic_values: &[f64],
        column: &[f64],
        tolerance: f64,
    ) -> Option<usize> {
        debug_assert_eq!(basic_values.len(), self.nr_rows());
        debug_assert_eq!(column.len(), self.nr_rows());

        let mut min_values: Option<(usize, f64)> = None;
        for (row, (&value, &xij)) in basic_values.iter().zip(column).enumerate() {
            if xij > tolerance {
                let ratio = value.max(0_f64) / xij;
                match min_values {
                    Some((_, min_ratio)) if ratio >= min_ratio => {},
                    _ => min_values = Some((row, ratio)),
                }
            }
        }

        min_values.map(|(row, _)| row)
    }

    /// Brings a column into the basis by updating the basis inverse and the data structures
    /// holding the collection of basis columns.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Row of the leaving column.
    /// * `pivot_column_index`: Entering column, not yet in the basis.
    /// * `column`: Entering column with respect to the current basis.
    ///
    /// # Return value
    ///
    /// Index of the column that left the basis.
    pub fn bring_into_basis(
        &mut self,
        pivot_row_index: usize,
        pivot_column_index: usize,
        column: &[f64],
    ) -> usize {
        debug_assert!(pivot_column_index < self.nr_columns());
        debug_assert!(pivot_row_index < self.nr_rows());
        debug_assert!(!self.is_in_basis(pivot_column_index));

        self.inverse_maintainer.change_basis(pivot_row_index, column);
        let leaving_column = std::mem::replace(&mut self.basis_indices[pivot_row_index], pivot_column_index);

        let was_there = self.basis_columns.remove(&leaving_column);
        debug_assert!(was_there);
        let was_not_there = self.basis_columns.insert(pivot_column_index);
        debug_assert!(was_not_there);

        leaving_column
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        debug_assert!(column < self.nr_columns());

        self.basis_columns.contains(&column)
    }

    /// Basis column for each row.
    pub fn basis(&self) -> &[usize] {
        &self.basis_indices
    }

    /// Give up the tableau, keeping the basis.
    pub fn into_basis(self) -> Vec<usize> {
        self.basis_indices
    }

    /// Get the current basic feasible solution.
    ///
    /// # Return value
    ///
    /// Dense vector of length `self.nr_columns()`.
    pub fn current_bfs(&self) -> Vec<f64> {
        let mut x = vec![0_f64; self.nr_columns()];
        for (&j, value) in self.basis_indices.iter().zip(self.basic_values()) {
            x[j] = value;
        }

        x
    }

    /// Get the cost of the current solution.
    pub fn objective_function_value(&self) -> f64 {
        let basis_costs = self.basis_indices.iter()
            .map(|&j| self.provider.cost_value(j))
            .collect::<Vec<_>>();

        inner_product(&basis_costs, &self.basic_values())
    }

    /// The current basis inverse.
    pub fn inverse(&self) -> &BasisInverse {
        &self.inverse_maintainer
    }

    /// Number of rows in the tableau.
    pub fn nr_rows(&self) -> usize {
        self.provider.nr_rows()
    }

    /// Number of variables in the problem.
    pub fn nr_columns(&self) -> usize {
        self.provider.nr_columns()
    }
}

/// Check whether the tableau currently has a valid basis.
///
/// Only used for debug purposes.
pub fn debug_assert_valid_basis<S: ColumnSource + ?Sized>(tableau: &Tableau<S>) {
    // Correct number of basis columns (uniqueness is implied because it's a set)
    debug_assert_eq!(tableau.basis_columns.len(), tableau.nr_rows());

    // Basis columns map to unit vectors
    for (i, &j) in tableau.basis_indices.iter().enumerate() {
        let column = tableau.generate_column(j);
        for (k, value) in column.into_iter().enumerate() {
            let expected = if k == i { 1_f64 } else { 0_f64 };
            debug_assert!(
                (value - expected).abs() < 1e-6,
                "Column {} is not equal to e_{}", j, i,
            );
        }
    }
}

impl<S: ColumnSource + ?Sized> Display for Tableau<'_, S> {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        writeln!(f, "basis: {:?}", self.basis_indices)?;
        let basic_values = self.basic_values();
        for (row, (j, value)) in self.basis_indices.iter().zip(basic_values).enumerate() {
            writeln!(f, "{:>6}: x[{}] = {}", row, j, value)?;
        }
        writeln!(f, "objective: {}", self.objective_function_value())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::error::SolveError;
    use crate::algorithm::two_phase::tableau::{debug_assert_valid_basis, Tableau};
    use crate::tests::problem_1;

    #[test]
    fn rank_one_update_matches_inversion() {
        let problem = problem_1::create();
        let mut tableau = Tableau::new(&problem, vec![0, 1, 2]).unwrap();
        debug_assert_valid_basis(&tableau);

        let prior = tableau.inverse().matrix().clone();
        let column = tableau.generate_column(3);
        let leaving = tableau.bring_into_basis(0, 3, &column);
        assert_eq!(leaving, 0);
        assert_eq!(tableau.basis(), &[3, 1, 2]);
        assert!(tableau.is_in_basis(3));
        assert!(!tableau.is_in_basis(0));
        debug_assert_valid_basis(&tableau);

        let incremental = tableau.inverse().matrix().clone();
        assert!(prior.max_abs_difference(&incremental) > 0.5);

        tableau.reset_basis(&[3, 1, 2]).unwrap();
        assert!(tableau.inverse().matrix().max_abs_difference(&incremental) < 1e-3);
    }

    #[test]
    fn reset_is_idempotent() {
        let problem = problem_1::create();
        let mut tableau = Tableau::new(&problem, vec![0, 1, 2]).unwrap();
        tableau.reset_basis(&[0, 1, 4]).unwrap();
        let first = tableau.inverse().clone();
        tableau.reset_basis(&[0, 1, 4]).unwrap();
        assert_eq!(tableau.inverse(), &first);
        assert_eq!(tableau.basis(), &[0, 1, 4]);
    }

    #[test]
    fn invalid_bases() {
        let problem = problem_1::create();
        assert!(matches!(Tableau::new(&problem, vec![0, 1]), Err(SolveError::Malformed(_))));
        assert!(matches!(Tableau::new(&problem, vec![0, 1, 5]), Err(SolveError::Malformed(_))));
        assert!(matches!(Tableau::new(&problem, vec![0, 0, 1]), Err(SolveError::Malformed(_))));

        let mut tableau = Tableau::new(&problem, vec![0, 1, 2]).unwrap();
        assert!(tableau.reset_basis(&[2, 2, 3]).is_err());
        assert_eq!(tableau.basis(), &[0, 1, 2]);
    }

    #[test]
    fn pricing_and_ratio_test() {
        let problem = problem_1::create();
        // x = [3, 3, 2, 0, 0] is the optimum
        let tableau = Tableau::new(&problem, vec![0, 1, 2]).unwrap();
        let x = tableau.current_bfs();
        for (computed, expected) in x.iter().zip([3f64, 3f64, 2f64, 0f64, 0f64]) {
            assert_abs_diff_eq!(*computed, expected, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(tableau.objective_function_value(), 9f64, epsilon = 1e-10);

        let dual = tableau.left_basis_solution();
        for &j in tableau.basis() {
            assert_abs_diff_eq!(tableau.relative_cost(&dual, j), 0f64, epsilon = 1e-10);
        }
        for j in 3..problem.nr_columns() {
            assert!(tableau.relative_cost(&dual, j) >= 0f64);
        }

        assert_eq!(tableau.select_primal_pivot_row(&[1f64, 0f64, 2f64], &[1f64, 1f64, 1f64], 1e-7), Some(1));
        assert_eq!(tableau.select_primal_pivot_row(&[2f64, 1f64, 2f64], &[2f64, 1f64, 1f64], 1e-7), Some(0));
        assert_eq!(tableau.select_primal_pivot_row(&[1f64, 1f64, 1f64], &[-1f64, 1e-8, 0f64], 1e-7), None);
    }
}
