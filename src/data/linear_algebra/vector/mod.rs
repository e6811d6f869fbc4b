//! # Vector types and helpers
//!
//! Dense vectors are plain slices of floats; this module has the handful of operations the solver
//! performs on them. Sparse vectors have their own type, used to move matrix columns around
//! without densifying them.
use num_traits::Float;

pub use sparse::SparseVec;

mod sparse;

/// Inner product of two dense vectors of equal length.
pub fn inner_product<F: Float>(left: &[F], right: &[F]) -> F {
    debug_assert_eq!(left.len(), right.len());

    left.iter().zip(right).fold(F::zero(), |total, (&l, &r)| total + l * r)
}

/// Euclidean norm of a dense vector.
pub fn norm<F: Float>(vector: &[F]) -> F {
    inner_product(vector, vector).sqrt()
}

/// Add a multiple of `source` to `target`.
pub fn add_multiple<F: Float>(target: &mut [F], factor: F, source: &[F]) {
    debug_assert_eq!(target.len(), source.len());

    for (t, &s) in target.iter_mut().zip(source) {
        *t = *t + factor * s;
    }
}

/// Largest absolute element-wise difference between two vectors of equal length.
pub fn max_abs_difference<F: Float>(left: &[F], right: &[F]) -> F {
    debug_assert_eq!(left.len(), right.len());

    left.iter().zip(right)
        .map(|(&l, &r)| (l - r).abs())
        .fold(F::zero(), F::max)
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::data::linear_algebra::vector::{add_multiple, inner_product, max_abs_difference, norm};

    #[test]
    fn dense_helpers() {
        let x = [1f64, 2f64, 2f64];
        assert_abs_diff_eq!(inner_product(&x, &[1f64, 0f64, -1f64]), -1f64);
        assert_abs_diff_eq!(norm(&x), 3f64);

        let mut y = [1f64, 1f64, 1f64];
        add_multiple(&mut y, -2f64, &x);
        assert_eq!(y, [-1f64, -3f64, -3f64]);
        assert_abs_diff_eq!(max_abs_difference(&x, &y), 5f64);
    }
}
