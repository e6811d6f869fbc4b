//! # Linear programs in canonical form
//!
//! Minimize `c^T x` subject to `A x = b` and `x >= 0`.
use std::collections::HashSet;
use std::fmt;

use crate::algorithm::error::SolveError;
use crate::data::linear_algebra::matrix::{ColumnMajor, Matrix};
use crate::data::linear_algebra::vector::inner_product;

/// A linear program in canonical form.
///
/// Instances are immutable; extracting rows produces a new problem.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalForm<M = ColumnMajor> {
    constraints: M,
    b: Vec<f64>,
    cost: Vec<f64>,
}

/// Why a vector is not a feasible solution.
#[derive(Clone, Debug, PartialEq)]
pub enum Infeasibility {
    /// A value is below zero by more than the tolerance.
    Negative {
        /// Column index.
        index: usize,
        /// Its value.
        value: f64,
    },
    /// A constraint row is violated by more than the tolerance.
    Residual {
        /// Row index.
        row: usize,
        /// `(A x)_row - b_row`.
        residual: f64,
    },
    /// The vector has the wrong length.
    Length {
        /// Length found.
        length: usize,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Infeasibility::Negative { index, value } => write!(f, "x[{}] = {} is negative", index, value),
            Infeasibility::Residual { row, residual } => write!(f, "row {} violated by {}", row, residual),
            Infeasibility::Length { length } => write!(f, "solution has wrong length {}", length),
        }
    }
}

impl<M: Matrix> CanonicalForm<M> {
    /// Create a new problem.
    ///
    /// # Arguments
    ///
    /// * `constraints`: The matrix `A`, `m` rows and `n` columns.
    /// * `b`: Right-hand side of length `m`.
    /// * `cost`: Cost vector of length `n`.
    ///
    /// # Return value
    ///
    /// `SolveError::Malformed` if the lengths don't match or a value is not finite.
    pub fn new(constraints: M, b: Vec<f64>, cost: Vec<f64>) -> Result<Self, SolveError> {
        if b.len() != constraints.nr_rows() {
            return Err(SolveError::Malformed(format!(
                "{} constraint rows but right-hand side of length {}", constraints.nr_rows(), b.len(),
            )));
        }
        if cost.len() != constraints.nr_columns() {
            return Err(SolveError::Malformed(format!(
                "{} columns but cost vector of length {}", constraints.nr_columns(), cost.len(),
            )));
        }
        if !b.iter().chain(&cost).all(|v| v.is_finite()) {
            return Err(SolveError::Malformed("non-finite value in right-hand side or cost".to_string()));
        }

        Ok(Self { constraints, b, cost })
    }

    /// The constraint matrix `A`.
    pub fn constraints(&self) -> &M {
        &self.constraints
    }

    /// Right-hand side `b`.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Cost vector `c`.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// Number of constraint rows.
    pub fn nr_rows(&self) -> usize {
        self.constraints.nr_rows()
    }

    /// Number of variables.
    pub fn nr_columns(&self) -> usize {
        self.constraints.nr_columns()
    }

    /// Keep only the given rows.
    ///
    /// # Arguments
    ///
    /// * `rows`: Strictly ascending row indices.
    pub fn extract_rows(&self, rows: &[usize]) -> Self {
        Self {
            constraints: self.constraints.extract_rows(rows),
            b: rows.iter().map(|&i| self.b[i]).collect(),
            cost: self.cost.clone(),
        }
    }

    /// Solution of `A x = b` with only the basic columns nonzero.
    ///
    /// # Arguments
    ///
    /// * `basis`: One distinct column index per row.
    ///
    /// # Return value
    ///
    /// A dense vector of length `n`. `SolveError::Malformed` if the basis has the wrong length,
    /// contains out of range or duplicate indices, or is singular.
    pub fn basic_solution(&self, basis: &[usize]) -> Result<Vec<f64>, SolveError> {
        validate_basis(basis, self.nr_rows(), self.nr_columns())?;

        let x_basis = self.constraints.extract_columns(basis)
            .solve(&self.b, false)
            .ok_or_else(|| SolveError::Malformed("basis matrix is singular".to_string()))?;

        let mut x = vec![0_f64; self.nr_columns()];
        for (&j, value) in basis.iter().zip(x_basis) {
            x[j] = value;
        }

        Ok(x)
    }

    /// Check that `x >= 0` and `A x = b`, both within a tolerance.
    ///
    /// The residual of row `i` may be at most `tolerance * max(1, |b_i|)`.
    pub fn check_primal_feasibility(&self, x: &[f64], tolerance: f64) -> Result<(), Infeasibility> {
        if x.len() != self.nr_columns() {
            return Err(Infeasibility::Length { length: x.len() });
        }
        if let Some((index, &value)) = x.iter().enumerate().find(|&(_, &v)| !(v >= -tolerance)) {
            return Err(Infeasibility::Negative { index, value });
        }

        let product = self.constraints.multiply(x);
        for (row, (ax, &b)) in product.iter().zip(&self.b).enumerate() {
            let residual = ax - b;
            if !(residual.abs() <= tolerance * b.abs().max(1_f64)) {
                return Err(Infeasibility::Residual { row, residual });
            }
        }

        Ok(())
    }

    /// Cost of a solution.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        inner_product(&self.cost, x)
    }
}

/// Check that a basis has one entry per row, all of them distinct and in range.
pub(crate) fn validate_basis(basis: &[usize], nr_rows: usize, nr_columns: usize) -> Result<(), SolveError> {
    if basis.len() != nr_rows {
        return Err(SolveError::Malformed(format!(
            "basis of length {} for {} rows", basis.len(), nr_rows,
        )));
    }
    if let Some(&j) = basis.iter().find(|&&j| j >= nr_columns) {
        return Err(SolveError::Malformed(format!(
            "basis column {} out of range for {} columns", j, nr_columns,
        )));
    }
    let mut seen = HashSet::with_capacity(basis.len());
    if let Some(&j) = basis.iter().find(|&&j| !seen.insert(j)) {
        return Err(SolveError::Malformed(format!("column {} appears twice in basis", j)));
    }

    Ok(())
}

impl<M: Matrix> fmt::Display for CanonicalForm<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "min c^T x, A x = b, x >= 0")?;
        for i in 0..self.nr_rows() {
            for value in self.constraints.row(i).to_dense() {
                write!(f, "{:>10.4} ", value)?;
            }
            writeln!(f, "| {:>10.4}", self.b[i])?;
        }
        for value in &self.cost {
            write!(f, "{:>10.4} ", value)?;
        }
        writeln!(f, "(cost)")
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::error::SolveError;
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::data::linear_program::canonical_form::{CanonicalForm, Infeasibility};

    fn problem() -> CanonicalForm<DenseMatrix> {
        let constraints = DenseMatrix::new(vec![
            vec![1f64, 1f64, 1f64, 0f64],
            vec![1f64, -1f64, 0f64, 1f64],
        ], 4).unwrap();
        CanonicalForm::new(constraints, vec![4f64, 1f64], vec![1f64, 2f64, 0f64, 0f64]).unwrap()
    }

    #[test]
    fn new() {
        let constraints = DenseMatrix::identity(2);
        assert!(matches!(
            CanonicalForm::new(constraints.clone(), vec![1f64], vec![1f64, 1f64]),
            Err(SolveError::Malformed(_)),
        ));
        assert!(matches!(
            CanonicalForm::new(constraints.clone(), vec![1f64, 1f64], vec![1f64]),
            Err(SolveError::Malformed(_)),
        ));
        assert!(matches!(
            CanonicalForm::new(constraints, vec![f64::NAN, 1f64], vec![1f64, 1f64]),
            Err(SolveError::Malformed(_)),
        ));
    }

    #[test]
    fn basic_solution() {
        let problem = problem();
        let x = problem.basic_solution(&[2, 3]).unwrap();
        assert_eq!(x, vec![0f64, 0f64, 4f64, 1f64]);

        let x = problem.basic_solution(&[1, 0]).unwrap();
        assert_abs_diff_eq!(x[0], 2.5f64, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.5f64, epsilon = 1e-12);
        assert_abs_diff_eq!(problem.objective_value(&x), 5.5f64, epsilon = 1e-12);

        assert!(matches!(problem.basic_solution(&[0]), Err(SolveError::Malformed(_))));
        assert!(matches!(problem.basic_solution(&[0, 4]), Err(SolveError::Malformed(_))));
        assert!(matches!(problem.basic_solution(&[1, 1]), Err(SolveError::Malformed(_))));
    }

    #[test]
    fn feasibility() {
        let problem = problem();
        assert_eq!(problem.check_primal_feasibility(&[0f64, 0f64, 4f64, 1f64], 1e-8), Ok(()));
        assert_eq!(
            problem.check_primal_feasibility(&[2f64, 0f64, 2f64, -1f64], 1e-8),
            Err(Infeasibility::Negative { index: 3, value: -1f64 }),
        );
        assert!(matches!(
            problem.check_primal_feasibility(&[0f64, 0f64, 4f64, 2f64], 1e-8),
            Err(Infeasibility::Residual { row: 1, .. }),
        ));
        assert_eq!(problem.check_primal_feasibility(&[0f64, 0f64, 4f64, 1f64 + 1e-9], 1e-8), Ok(()));
    }

    #[test]
    fn extract_rows() {
        let extracted = problem().extract_rows(&[1]);
        assert_eq!(extracted.nr_rows(), 1);
        assert_eq!(extracted.b(), &[1f64]);
        assert_eq!(extracted.cost().len(), 4);
    }

    #[test]
    fn display() {
        let text = problem().to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("|     4.0000"));
        assert!(lines[3].ends_with("(cost)"));
    }
}
