//! # Sparse vector
//!
//! Two parallel `Vec`s with indices and values, fixed dimension.
use std::iter::{Copied, Zip};
use std::slice::Iter;

use num_traits::Float;

use crate::data::linear_algebra::{SparseTuple, StructureError};

/// Immutable sparse vector.
///
/// Indices are strictly ascending and smaller than `dim`. Values stored explicitly may still be
/// zero, so the number of nonzero elements can't be read from the storage size.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVec<F = f64> {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<F>,
}

impl<F> SparseVec<F> {
    /// Create a new sparse vector, checking the structure of the input.
    ///
    /// # Arguments
    ///
    /// * `dim`: Dimension of the vector represented.
    /// * `indices`: Strictly ascending indices, all smaller than `dim`.
    /// * `values`: Value for each index.
    pub fn new(dim: usize, indices: Vec<usize>, values: Vec<F>) -> Result<Self, StructureError> {
        if indices.len() != values.len() {
            return Err(StructureError::LengthMismatch { indices: indices.len(), values: values.len() });
        }
        if let Some(position) = indices.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(StructureError::Unsorted { position: position + 1 });
        }
        if let Some(&index) = indices.last() {
            if index >= dim {
                return Err(StructureError::IndexOutOfBounds { index, dim });
            }
        }

        Ok(Self { dim, indices, values })
    }

    /// Create a new sparse vector from `(index, value)` tuples.
    pub fn from_tuples(dim: usize, tuples: Vec<SparseTuple<F>>) -> Result<Self, StructureError> {
        let (indices, values) = tuples.into_iter().unzip();
        Self::new(dim, indices, values)
    }

    /// Create a new sparse vector from data that is already known to be valid.
    pub(crate) fn new_unchecked(dim: usize, indices: Vec<usize>, values: Vec<F>) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        debug_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        debug_assert!(indices.last().is_none_or(|&i| i < dim));

        Self { dim, indices, values }
    }

    /// A vector without any stored elements.
    pub fn empty(dim: usize) -> Self {
        Self { dim, indices: Vec::new(), values: Vec::new() }
    }

    /// Dimension of the vector represented.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Indices of the stored elements.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Values of the stored elements.
    pub fn values(&self) -> &[F] {
        &self.values
    }

    /// The number of explicitly stored elements (not necessarily nonzero).
    pub fn size(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over the stored `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> Zip<Copied<Iter<'_, usize>>, Iter<'_, F>> {
        self.indices.iter().copied().zip(self.values.iter())
    }
}

impl<F: Float> SparseVec<F> {
    /// Unit vector along axis `i`.
    pub fn standard_basis_vector(i: usize, dim: usize) -> Self {
        debug_assert!(i < dim);

        Self { dim, indices: vec![i], values: vec![F::one()] }
    }

    /// Keep the nonzero values of a dense vector.
    pub fn from_dense(dense: &[F]) -> Self {
        let (indices, values) = dense.iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, &v)| (i, v))
            .unzip();

        Self { dim: dense.len(), indices, values }
    }

    /// Value at index `i`, zero when not stored.
    ///
    /// This is a binary search; iterate instead where possible.
    pub fn get(&self, i: usize) -> F {
        debug_assert!(i < self.dim);

        match self.indices.binary_search(&i) {
            Ok(position) => self.values[position],
            Err(_) => F::zero(),
        }
    }

    /// Inner product with a dense vector of the same dimension.
    pub fn dot(&self, other: &[F]) -> F {
        debug_assert_eq!(other.len(), self.dim);

        self.iter().fold(F::zero(), |total, (i, &v)| total + v * other[i])
    }

    /// Sum of the squared values.
    pub fn squared_norm(&self) -> F {
        self.values.iter().fold(F::zero(), |total, &v| total + v * v)
    }

    /// Multiply each element with the factor at its index.
    pub fn scale(&self, factors: &[F]) -> Self {
        debug_assert_eq!(factors.len(), self.dim);

        Self {
            dim: self.dim,
            indices: self.indices.clone(),
            values: self.iter().map(|(i, &v)| v * factors[i]).collect(),
        }
    }

    /// Dense representation.
    pub fn to_dense(&self) -> Vec<F> {
        let mut dense = vec![F::zero(); self.dim];
        for (i, &v) in self.iter() {
            dense[i] = v;
        }
        dense
    }
}
