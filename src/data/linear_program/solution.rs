//! # Representation of optimal solutions
//!
//! The solver returns the primal values together with the basis that produced them, so that the
//! basis can be used to warm start a related problem.
use crate::data::linear_algebra::vector::inner_product;

/// Optimal (or otherwise final) solution of a problem in canonical form.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Value for each column, zero for the non-basic ones.
    x: Vec<f64>,
    /// Column indices, one per row of the problem that was solved.
    basis: Vec<usize>,
    /// One multiplier per constraint row.
    dual: Option<Vec<f64>>,
}

impl Solution {
    /// Create a new instance without dual information.
    pub fn new(x: Vec<f64>, basis: Vec<usize>) -> Self {
        Self { x, basis, dual: None }
    }

    /// Attach a dual vector.
    #[must_use]
    pub fn with_dual(mut self, dual: Vec<f64>) -> Self {
        self.dual = Some(dual);
        self
    }

    /// Primal values.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// The terminal basis.
    ///
    /// This can be passed back to the solver as a warm start. When redundant rows were dropped
    /// before solving, it has one entry per kept row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Dual values `c_B^T B^-1`, one per row of the original problem.
    ///
    /// Rows that were dropped as redundant get a zero multiplier.
    pub fn dual(&self) -> Option<&[f64]> {
        self.dual.as_deref()
    }

    /// Objective value of these primal values under the given cost vector.
    pub fn objective_value(&self, cost: &[f64]) -> f64 {
        inner_product(&self.x, cost)
    }

    /// Take the primal values, basis and dual values out of this solution.
    pub fn into_parts(self) -> (Vec<f64>, Vec<usize>, Option<Vec<f64>>) {
        (self.x, self.basis, self.dual)
    }
}
