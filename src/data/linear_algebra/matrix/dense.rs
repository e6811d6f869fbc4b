//! # Dense matrix
//!
//! Row-major storage, used for basis inverses and small problems.
use std::cmp::Ordering;
use std::fmt;

use index_utils::remove_indices;

use crate::data::linear_algebra::StructureError;
use crate::data::linear_algebra::matrix::Matrix;
use crate::data::linear_algebra::vector::{add_multiple, inner_product, SparseVec};

/// Relative size of the smallest pivot accepted during factorization.
const SINGULARITY_THRESHOLD: f64 = 1e-12;
/// Relative residual accepted when a non-square system is solved without asking for least squares.
const CONSISTENCY_THRESHOLD: f64 = 1e-8;

/// Row-major dense matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    rows: Vec<Vec<f64>>,
    nr_columns: usize,
}

impl DenseMatrix {
    /// Create a new instance from its rows.
    ///
    /// # Arguments
    ///
    /// * `rows`: Each row should have length `nr_columns`.
    /// * `nr_columns`: Number of columns, needed when there are no rows.
    pub fn new(rows: Vec<Vec<f64>>, nr_columns: usize) -> Result<Self, StructureError> {
        match rows.iter().find(|row| row.len() != nr_columns) {
            Some(row) => Err(StructureError::DimensionMismatch { expected: nr_columns, found: row.len() }),
            None => Ok(Self { rows, nr_columns }),
        }
    }

    /// All zero matrix.
    pub fn zeros(nr_rows: usize, nr_columns: usize) -> Self {
        Self { rows: vec![vec![0_f64; nr_columns]; nr_rows], nr_columns }
    }

    /// Square identity matrix.
    pub fn identity(m: usize) -> Self {
        let mut result = Self::zeros(m, m);
        for i in 0..m {
            result.rows[i][i] = 1_f64;
        }

        result
    }

    /// Value at row `i` and column `j`.
    pub fn get_value(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nr_rows() && j < self.nr_columns);

        self.rows[i][j]
    }

    /// Overwrite the value at row `i` and column `j`.
    pub fn set_value(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.nr_rows() && j < self.nr_columns);

        self.rows[i][j] = value;
    }

    /// Row `i` as a slice.
    pub fn row_slice(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// Multiply all values in row `i` by `factor`.
    pub fn multiply_row(&mut self, i: usize, factor: f64) {
        self.rows[i].iter_mut().for_each(|v| *v *= factor);
    }

    /// Add `factor` times row `source` to row `target`.
    pub fn mul_add_rows(&mut self, source: usize, target: usize, factor: f64) {
        debug_assert_ne!(source, target);

        let (source_row, target_row) = match source.cmp(&target) {
            Ordering::Less => {
                let (left, right) = self.rows.split_at_mut(target);
                (&left[source], &mut right[0])
            },
            Ordering::Greater => {
                let (left, right) = self.rows.split_at_mut(source);
                (&right[0], &mut left[target])
            },
            Ordering::Equal => return,
        };
        add_multiple(target_row, factor, source_row);
    }

    /// Row vector times matrix, `y^T M`.
    pub fn left_multiply(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.nr_rows());

        let mut result = vec![0_f64; self.nr_columns];
        for (row, &factor) in self.rows.iter().zip(y) {
            if factor != 0_f64 {
                add_multiple(&mut result, factor, row);
            }
        }

        result
    }

    /// Matrix times dense column vector.
    pub fn right_multiply(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.nr_columns);

        self.rows.iter().map(|row| inner_product(row, x)).collect()
    }

    /// Matrix times sparse column vector.
    pub fn right_multiply_sparse(&self, x: &SparseVec) -> Vec<f64> {
        debug_assert_eq!(x.dim(), self.nr_columns);

        self.rows.iter().map(|row| x.dot(row)).collect()
    }

    /// Matrix product.
    pub fn multiply_matrix(&self, other: &DenseMatrix) -> DenseMatrix {
        debug_assert_eq!(self.nr_columns, other.nr_rows());

        let rows = self.rows.iter()
            .map(|row| other.left_multiply(row))
            .collect();

        Self { rows, nr_columns: other.nr_columns }
    }

    /// Transposed copy.
    pub fn transpose(&self) -> DenseMatrix {
        let rows = (0..self.nr_columns)
            .map(|j| self.rows.iter().map(|row| row[j]).collect())
            .collect();

        Self { rows, nr_columns: self.nr_rows() }
    }

    /// Largest absolute value.
    pub fn max_abs_value(&self) -> f64 {
        self.rows.iter().flatten().fold(0_f64, |max, v| max.max(v.abs()))
    }

    /// Largest absolute difference between values at the same position.
    pub fn max_abs_difference(&self, other: &DenseMatrix) -> f64 {
        debug_assert_eq!(self.nr_rows(), other.nr_rows());
        debug_assert_eq!(self.nr_columns, other.nr_columns);

        self.rows.iter().flatten()
            .zip(other.rows.iter().flatten())
            .fold(0_f64, |max, (a, b)| max.max((a - b).abs()))
    }

    /// Solve `A x = rhs`.
    ///
    /// Square systems are solved with an LU decomposition with partial pivoting. Other shapes
    /// go through the normal equations `A^T A x = A^T rhs`.
    ///
    /// # Arguments
    ///
    /// * `rhs`: Right hand side of length `nr_rows`.
    /// * `least_squares`: Whether a least squares solution of an inconsistent non-square system is
    /// acceptable.
    ///
    /// # Return value
    ///
    /// `None` if the relevant system is singular, or if the system is not square, inconsistent and
    /// no least squares solution was asked for.
    pub fn solve(&self, rhs: &[f64], least_squares: bool) -> Option<Vec<f64>> {
        debug_assert_eq!(rhs.len(), self.nr_rows());

        if self.nr_rows() == self.nr_columns {
            return LowerUpper::decompose(self).map(|lu| lu.solve(rhs));
        }

        let transposed = self.transpose();
        let normal = transposed.multiply_matrix(self);
        let x = LowerUpper::decompose(&normal)?.solve(&transposed.right_multiply(rhs));

        if !least_squares {
            let scale = rhs.iter().fold(1_f64, |max, v| max.max(v.abs()));
            let residual = self.right_multiply(&x).iter().zip(rhs)
                .fold(0_f64, |max, (ax, b)| max.max((ax - b).abs()));
            if residual > CONSISTENCY_THRESHOLD * scale {
                return None;
            }
        }

        Some(x)
    }

    /// Inverse of a square matrix, `None` if singular.
    pub fn inverse(&self) -> Option<DenseMatrix> {
        debug_assert_eq!(self.nr_rows(), self.nr_columns);

        let m = self.nr_columns;
        let lower_upper = LowerUpper::decompose(self)?;

        let mut inverse = Self::zeros(m, m);
        let mut unit = vec![0_f64; m];
        for j in 0..m {
            unit[j] = 1_f64;
            let column = lower_upper.solve(&unit);
            for (i, value) in column.into_iter().enumerate() {
                inverse.rows[i][j] = value;
            }
            unit[j] = 0_f64;
        }

        Some(inverse)
    }
}

impl Matrix for DenseMatrix {
    fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn column(&self, j: usize) -> SparseVec {
        debug_assert!(j < self.nr_columns);

        let (indices, values) = self.rows.iter()
            .enumerate()
            .filter(|(_, row)| row[j] != 0_f64)
            .map(|(i, row)| (i, row[j]))
            .unzip();

        SparseVec::new_unchecked(self.nr_rows(), indices, values)
    }

    fn row(&self, i: usize) -> SparseVec {
        SparseVec::from_dense(&self.rows[i])
    }

    fn extract_rows(&self, rows: &[usize]) -> Self {
        debug_assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
        debug_assert!(rows.last().is_none_or(|&i| i < self.nr_rows()));

        let to_remove = (0..self.nr_rows())
            .filter(|i| rows.binary_search(i).is_err())
            .collect::<Vec<_>>();
        let mut kept = self.rows.clone();
        remove_indices(&mut kept, &to_remove);

        Self { rows: kept, nr_columns: self.nr_columns }
    }

    fn solve(&self, rhs: &[f64], least_squares: bool) -> Option<Vec<f64>> {
        DenseMatrix::solve(self, rhs, least_squares)
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.rows {
            for value in row {
                write!(f, "{:>10.4} ", value)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// LU decomposition with partial pivoting, `P A = L U`.
///
/// `L` (unit diagonal, not stored) and `U` share storage.
struct LowerUpper {
    factors: Vec<Vec<f64>>,
    /// Row `i` of `P A` is row `permutation[i]` of `A`.
    permutation: Vec<usize>,
}

impl LowerUpper {
    fn decompose(matrix: &DenseMatrix) -> Option<Self> {
        debug_assert_eq!(matrix.nr_rows(), matrix.nr_columns);

        let m = matrix.nr_columns;
        let threshold = SINGULARITY_THRESHOLD * matrix.max_abs_value();
        let mut factors = matrix.rows.clone();
        let mut permutation = (0..m).collect::<Vec<_>>();

        for k in 0..m {
            let pivot_index = (k..m)
                .max_by(|&i, &j| factors[i][k].abs().total_cmp(&factors[j][k].abs()))?;
            let pivot = factors[pivot_index][k].abs();
            if pivot.is_nan() || pivot <= threshold {
                return None;
            }
            factors.swap(k, pivot_index);
            permutation.swap(k, pivot_index);

            let (upper, lower) = factors.split_at_mut(k + 1);
            let pivot_row = &upper[k];
            for row in lower.iter_mut() {
                let factor = row[k] / pivot_row[k];
                row[k] = factor;
                if factor != 0_f64 {
                    for j in (k + 1)..m {
                        row[j] -= factor * pivot_row[j];
                    }
                }
            }
        }

        Some(Self { factors, permutation })
    }

    fn solve(&self, rhs: &[f64]) -> Vec<f64> {
        let m = self.permutation.len();
        debug_assert_eq!(rhs.len(), m);

        let mut x = self.permutation.iter().map(|&i| rhs[i]).collect::<Vec<_>>();
        for i in 0..m {
            let sum = inner_product(&self.factors[i][..i], &x[..i]);
            x[i] -= sum;
        }
        for i in (0..m).rev() {
            let sum = inner_product(&self.factors[i][(i + 1)..], &x[(i + 1)..]);
            x[i] = (x[i] - sum) / self.factors[i][i];
        }

        x
    }
}
