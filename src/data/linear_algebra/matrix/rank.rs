//! # Rank revealing selection
//!
//! Greedy selection of a linearly independent subset of vectors with modified Gram-Schmidt.
use crate::data::linear_algebra::vector::{add_multiple, inner_product, norm, SparseVec};

/// Number of orthogonalization passes for each candidate.
///
/// A single pass of modified Gram-Schmidt loses orthogonality when candidates are nearly
/// dependent, a second pass recovers it.
const NR_ORTHOGONALIZATION_PASSES: usize = 2;

/// Select indices of linearly independent candidate vectors.
///
/// Candidates are unit-normalized and orthogonalized against the vectors accepted so far. A
/// candidate is accepted when the norm of what remains exceeds `epsilon`.
///
/// # Arguments
///
/// * `dim`: Length of each candidate vector, also the maximum number of vectors accepted.
/// * `nr_candidates`: Candidates are indexed `0..nr_candidates`.
/// * `hint`: Indices to consider first, in this order. Out of range indices are ignored.
/// * `candidate`: Produces the candidate vector for an index.
/// * `epsilon`: Acceptance threshold.
///
/// # Return value
///
/// Accepted indices, in the order in which they were accepted.
pub fn independent_subset(
    dim: usize,
    nr_candidates: usize,
    hint: &[usize],
    candidate: impl Fn(usize) -> SparseVec,
    epsilon: f64,
) -> Vec<usize> {
    let mut accepted = Vec::with_capacity(dim.min(nr_candidates));
    let mut orthonormal: Vec<Vec<f64>> = Vec::with_capacity(dim.min(nr_candidates));
    let mut considered = vec![false; nr_candidates];

    let order = hint.iter().copied()
        .filter(|&j| j < nr_candidates)
        .chain(0..nr_candidates);
    for j in order {
        if accepted.len() == dim {
            break;
        }
        if considered[j] {
            continue;
        }
        considered[j] = true;

        let vector = candidate(j);
        debug_assert_eq!(vector.dim(), dim);
        let length = vector.squared_norm().sqrt();
        if length <= 0_f64 || !length.is_finite() {
            continue;
        }

        let mut residual = vector.to_dense();
        residual.iter_mut().for_each(|v| *v /= length);
        for _ in 0..NR_ORTHOGONALIZATION_PASSES {
            for basis_vector in &orthonormal {
                let projection = inner_product(basis_vector, &residual);
                add_multiple(&mut residual, -projection, basis_vector);
            }
        }

        let remaining = norm(&residual);
        if remaining > epsilon {
            residual.iter_mut().for_each(|v| *v /= remaining);
            orthonormal.push(residual);
            accepted.push(j);
        }
    }

    accepted
}
