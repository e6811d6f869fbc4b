//! # Access to problem data
//!
//! The simplex method only looks at the problem through this trait. That allows it to work on a
//! problem extended with artificial variables without copying the original.
use crate::data::linear_algebra::matrix::{DenseMatrix, Matrix};
use crate::data::linear_algebra::vector::SparseVec;
use crate::data::linear_program::canonical_form::CanonicalForm;

/// Columns, costs and right-hand side of a problem in canonical form.
pub trait ColumnSource {
    /// Number of constraint rows, the size of a basis.
    fn nr_rows(&self) -> usize;

    /// Number of variables.
    fn nr_columns(&self) -> usize;

    /// Right-hand side `b`.
    fn constraint_values(&self) -> &[f64];

    /// Cost coefficient of column `j`.
    fn cost_value(&self, j: usize) -> f64;

    /// Column `j` of the constraint matrix.
    fn column(&self, j: usize) -> SparseVec;

    /// Gather the given columns into a dense matrix.
    fn extract_columns(&self, columns: &[usize]) -> DenseMatrix {
        let mut result = DenseMatrix::zeros(self.nr_rows(), columns.len());
        for (k, &j) in columns.iter().enumerate() {
            for (i, &value) in self.column(j).iter() {
                result.set_value(i, k, value);
            }
        }

        result
    }

    /// Whether all cost coefficients are zero, in which case any feasible solution is optimal.
    fn is_zero_cost(&self) -> bool {
        (0..self.nr_columns()).all(|j| self.cost_value(j) == 0_f64)
    }
}

impl<M: Matrix> ColumnSource for CanonicalForm<M> {
    fn nr_rows(&self) -> usize {
        CanonicalForm::nr_rows(self)
    }

    fn nr_columns(&self) -> usize {
        CanonicalForm::nr_columns(self)
    }

    fn constraint_values(&self) -> &[f64] {
        self.b()
    }

    fn cost_value(&self, j: usize) -> f64 {
        self.cost()[j]
    }

    fn column(&self, j: usize) -> SparseVec {
        self.constraints().column(j)
    }

    fn extract_columns(&self, columns: &[usize]) -> DenseMatrix {
        self.constraints().extract_columns(columns)
    }
}
