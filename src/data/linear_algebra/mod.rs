//! # Linear algebra primitives
//!
//! Linear algebra primitives used to represent problem data in either a dense or a sparse format,
//! and to maintain the inverse of a basis matrix.
use std::error::Error;
use std::fmt;

pub mod matrix;
pub mod vector;

/// An element of a sparse vector: an index together with the value stored at that index.
pub type SparseTuple<F> = (usize, F);

/// A sparse data structure was built from data that violates its invariants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StructureError {
    /// An index is not smaller than the dimension of the structure.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The dimension it should have been smaller than.
        dim: usize,
    },
    /// Indices are not strictly ascending.
    ///
    /// The position is the position in the index list at which the order breaks.
    Unsorted {
        /// Position in the index list.
        position: usize,
    },
    /// The index and value lists have different lengths.
    LengthMismatch {
        /// Number of indices.
        indices: usize,
        /// Number of values.
        values: usize,
    },
    /// A row, column or vector does not have the length required by the structure.
    DimensionMismatch {
        /// Length that was required.
        expected: usize,
        /// Length that was found.
        found: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StructureError::IndexOutOfBounds { index, dim } => {
                write!(f, "index {} out of bounds for dimension {}", index, dim)
            },
            StructureError::Unsorted { position } => {
                write!(f, "indices not strictly ascending at position {}", position)
            },
            StructureError::LengthMismatch { indices, values } => {
                write!(f, "{} indices but {} values", indices, values)
            },
            StructureError::DimensionMismatch { expected, found } => {
                write!(f, "expected length {} but found {}", expected, found)
            },
        }
    }
}

impl Error for StructureError {}
