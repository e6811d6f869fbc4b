//! # Basis inverse
//!
//! Explicit dense row-major representation of the basis inverse `B^-1`. It is updated with a
//! rank-one update after each pivot and can be recomputed from scratch to remove accumulated
//! error.
use crate::data::linear_algebra::matrix::{DenseMatrix, Matrix};
use crate::data::linear_algebra::vector::SparseVec;

/// Explicit row-major dense representation of the basis inverse.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisInverse {
    rows: DenseMatrix,
}

impl BasisInverse {
    /// Inverse of the identity basis.
    pub fn identity(m: usize) -> Self {
        Self { rows: DenseMatrix::identity(m) }
    }

    /// Invert a basis matrix from scratch, in `O(m^3)` time.
    ///
    /// # Arguments
    ///
    /// * `basis_matrix`: Square matrix of which column `i` is the basis column of row `i`.
    ///
    /// # Return value
    ///
    /// `None` if the matrix is singular.
    pub fn invert(basis_matrix: &DenseMatrix) -> Option<Self> {
        basis_matrix.inverse().map(|rows| Self { rows })
    }

    /// Normalize the pivot row.
    ///
    /// That is, the pivot value will be set to `1`.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Index of the pivot row.
    /// * `column`: Column relative to the current basis to be entered into that basis.
    fn normalize_pivot_row(&mut self, pivot_row_index: usize, column: &[f64]) {
        let pivot_value = column[pivot_row_index];
        debug_assert_ne!(pivot_value, 0_f64, "Pivot value can't be zero.");

        self.rows.multiply_row(pivot_row_index, 1_f64 / pivot_value);
    }

    /// Row reduce the other basis inverse rows with the normalized pivot row.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Index of the pivot row.
    /// * `column`: Column relative to the current basis to be entered into that basis.
    ///
    /// # Note
    ///
    /// This method requires a normalized pivot row.
    fn row_reduce(&mut self, pivot_row_index: usize, column: &[f64]) {
        debug_assert!(pivot_row_index < self.m());

        for (edit_row_index, &column_value) in column.iter().enumerate() {
            if edit_row_index != pivot_row_index && column_value != 0_f64 {
                self.rows.mul_add_rows(pivot_row_index, edit_row_index, -column_value);
            }
        }
    }

    /// Replace the basis column at a row by a new column, in `O(m^2)` time.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Row of the leaving column.
    /// * `column`: The entering column relative to the current basis, that is, `B^-1 a_q`.
    pub fn change_basis(&mut self, pivot_row_index: usize, column: &[f64]) {
        debug_assert!(pivot_row_index < self.m());
        debug_assert_eq!(column.len(), self.m());

        // The order of these calls matters: the first of the two normalizes the pivot row
        self.normalize_pivot_row(pivot_row_index, column);
        self.row_reduce(pivot_row_index, column);
    }

    /// Compute `B^-1 a` for a sparse column `a`.
    pub fn left_multiply_by_basis_inverse(&self, column: &SparseVec) -> Vec<f64> {
        self.rows.right_multiply_sparse(column)
    }

    /// Compute `B^-1 v` for a dense column `v`.
    pub fn left_multiply_dense(&self, column: &[f64]) -> Vec<f64> {
        self.rows.right_multiply(column)
    }

    /// Compute `y^T B^-1` for a dense row `y`.
    pub fn right_multiply_by_basis_inverse(&self, row: &[f64]) -> Vec<f64> {
        self.rows.left_multiply(row)
    }

    /// The explicit inverse.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.rows
    }

    fn m(&self) -> usize {
        self.rows.nr_rows()
    }
}
