//! # Sparse column-major matrix
//!
//! The constraint matrices of linear programs are typically sparse and accessed column by column
//! during pricing.
use index_utils::remove_sparse_indices;

use crate::data::linear_algebra::{SparseTuple, StructureError};
use crate::data::linear_algebra::matrix::{DenseMatrix, Matrix};
use crate::data::linear_algebra::vector::SparseVec;

/// Sparse matrix stored as a list of columns.
///
/// Each column holds `(row index, value)` tuples, sorted by row index.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMajor {
    columns: Vec<Vec<SparseTuple<f64>>>,
    nr_rows: usize,
}

impl ColumnMajor {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `columns`: For each column, `(row index, value)` tuples with strictly ascending row
    /// indices below `nr_rows`.
    /// * `nr_rows`: Number of rows.
    pub fn new(
        columns: Vec<Vec<SparseTuple<f64>>>,
        nr_rows: usize,
    ) -> Result<Self, StructureError> {
        for column in &columns {
            if let Some(position) = column.windows(2).position(|pair| pair[0].0 >= pair[1].0) {
                return Err(StructureError::Unsorted { position: position + 1 });
            }
            if let Some(&(index, _)) = column.last() {
                if index >= nr_rows {
                    return Err(StructureError::IndexOutOfBounds { index, dim: nr_rows });
                }
            }
        }

        Ok(Self { columns, nr_rows })
    }

    /// Number of explicitly stored values.
    pub fn size(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

impl From<&DenseMatrix> for ColumnMajor {
    fn from(dense: &DenseMatrix) -> Self {
        let columns = (0..dense.nr_columns())
            .map(|j| dense.column(j).iter().map(|(i, &v)| (i, v)).collect())
            .collect();

        Self { columns, nr_rows: dense.nr_rows() }
    }
}

impl Matrix for ColumnMajor {
    fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    fn nr_columns(&self) -> usize {
        self.columns.len()
    }

    fn column(&self, j: usize) -> SparseVec {
        let (indices, values) = self.columns[j].iter().copied().unzip();
        SparseVec::new_unchecked(self.nr_rows, indices, values)
    }

    fn row(&self, i: usize) -> SparseVec {
        debug_assert!(i < self.nr_rows);

        let (indices, values) = self.columns.iter()
            .enumerate()
            .filter_map(|(j, column)| {
                column.binary_search_by_key(&i, |&(row, _)| row).ok()
                    .map(|position| (j, column[position].1))
            })
            .unzip();

        SparseVec::new_unchecked(self.columns.len(), indices, values)
    }

    fn extract_rows(&self, rows: &[usize]) -> Self {
        debug_assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));

        let to_remove = (0..self.nr_rows)
            .filter(|i| rows.binary_search(i).is_err())
            .collect::<Vec<_>>();
        let columns = self.columns.iter()
            .map(|column| {
                let mut column = column.clone();
                remove_sparse_indices(&mut column, &to_remove);
                column
            })
            .collect();

        Self { columns, nr_rows: rows.len() }
    }
}
