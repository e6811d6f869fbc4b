//! # Matrix backends
//!
//! The solver only needs a small set of operations on the constraint matrix. These are collected
//! in the [`Matrix`] trait, which is implemented by a dense row-major and a sparse column-major
//! representation.
use std::fmt::Debug;

pub use dense::DenseMatrix;
pub use sparse::ColumnMajor;

use crate::data::linear_algebra::vector::SparseVec;

mod dense;
mod sparse;
pub mod rank;

/// Operations the solver needs from a constraint matrix.
///
/// Implementors only need to provide access to rows and columns; the linear algebra is derived
/// from those.
pub trait Matrix: Clone + Debug {
    /// Number of rows.
    fn nr_rows(&self) -> usize;
    /// Number of columns.
    fn nr_columns(&self) -> usize;

    /// Column `j` as a sparse vector of dimension `nr_rows`.
    fn column(&self, j: usize) -> SparseVec;

    /// Row `i` as a sparse vector of dimension `nr_columns`.
    fn row(&self, i: usize) -> SparseVec;

    /// Keep only the rows at the given indices.
    ///
    /// # Arguments
    ///
    /// * `rows`: Strictly ascending row indices.
    ///
    /// # Return value
    ///
    /// A new matrix, the original is untouched.
    fn extract_rows(&self, rows: &[usize]) -> Self;

    /// Gather the given columns into a dense matrix with `nr_rows` rows.
    ///
    /// Column `k` of the result is column `columns[k]` of this matrix.
    fn extract_columns(&self, columns: &[usize]) -> DenseMatrix {
        let mut result = DenseMatrix::zeros(self.nr_rows(), columns.len());
        for (k, &j) in columns.iter().enumerate() {
            for (i, &value) in self.column(j).iter() {
                result.set_value(i, k, value);
            }
        }

        result
    }

    /// Select a maximal set of linearly independent columns.
    ///
    /// # Arguments
    ///
    /// * `hint`: Column indices to try before all others.
    /// * `epsilon`: Residual norm of a unit-normalized column after orthogonalization above which
    /// the column is considered independent.
    ///
    /// # Return value
    ///
    /// Column indices in the order in which they were accepted, at most `nr_rows` of them.
    fn col_basis(&self, hint: &[usize], epsilon: f64) -> Vec<usize> {
        rank::independent_subset(
            self.nr_rows(),
            self.nr_columns(),
            hint,
            |j| self.column(j),
            epsilon,
        )
    }

    /// Select a maximal set of linearly independent rows.
    ///
    /// # Return value
    ///
    /// Sorted row indices.
    fn row_basis(&self, hint: &[usize], epsilon: f64) -> Vec<usize> {
        let mut rows = rank::independent_subset(
            self.nr_columns(),
            self.nr_rows(),
            hint,
            |i| self.row(i),
            epsilon,
        );
        rows.sort_unstable();

        rows
    }

    /// Matrix-vector product `A x`.
    fn multiply(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.nr_columns());

        let mut result = vec![0_f64; self.nr_rows()];
        for (j, &x_j) in x.iter().enumerate() {
            if x_j != 0_f64 {
                for (i, &value) in self.column(j).iter() {
                    result[i] += value * x_j;
                }
            }
        }

        result
    }

    /// Find `x` with `A x = rhs`.
    ///
    /// See [`DenseMatrix::solve`].
    fn solve(&self, rhs: &[f64], least_squares: bool) -> Option<Vec<f64>> {
        let columns = (0..self.nr_columns()).collect::<Vec<_>>();
        self.extract_columns(&columns).solve(rhs, least_squares)
    }
}
