//! # Textbook problems
//!
//! Small problems with known optimal solutions, each exercising a different path through the
//! solver.
use approx::assert_abs_diff_eq;

use wvlp::data::linear_algebra::matrix::{ColumnMajor, DenseMatrix, Matrix};
use wvlp::data::linear_algebra::vector::inner_product;
use wvlp::data::linear_program::canonical_form::CanonicalForm;

mod test;

/// Build a problem from dense rows, stored sparsely.
fn create(rows: Vec<Vec<f64>>, b: Vec<f64>, cost: Vec<f64>) -> CanonicalForm<ColumnMajor> {
    let nr_columns = cost.len();
    let dense = DenseMatrix::new(rows, nr_columns).unwrap();
    CanonicalForm::new(ColumnMajor::from(&dense), b, cost).unwrap()
}

fn assert_values(computed: &[f64], expected: &[f64]) {
    assert_eq!(computed.len(), expected.len());
    for (computed, expected) in computed.iter().zip(expected) {
        assert_abs_diff_eq!(*computed, *expected, epsilon = 1e-7);
    }
}

/// Dual feasibility and strong duality.
fn assert_optimal_dual<M: Matrix>(problem: &CanonicalForm<M>, x: &[f64], dual: &[f64]) {
    for j in 0..problem.nr_columns() {
        let reduced_cost = problem.cost()[j] - problem.constraints().column(j).dot(dual);
        assert!(reduced_cost > -1e-7, "column {} has reduced cost {}", j, reduced_cost);
    }
    assert_abs_diff_eq!(
        inner_product(problem.b(), dual),
        inner_product(problem.cost(), x),
        epsilon = 1e-6
    );
}
