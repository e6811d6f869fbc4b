//! # Solve outcomes that are not an optimal solution
//!
//! Problems that are infeasible or unbounded are not failures of the solver, but they are
//! reported through the same channel as malformed input and numerical trouble.
use std::error::Error;
use std::fmt;

use crate::data::linear_algebra::StructureError;

/// Reason why no optimal solution was returned.
///
/// Each variant carries a message for the end user.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// The input does not describe a valid problem, or a supplied basis is unusable.
    Malformed(String),
    /// There is no `x >= 0` with `A x = b`.
    Infeasible(String),
    /// The objective can be decreased without bound.
    Unbounded(String),
    /// The iteration limit was hit before optimality was established.
    ///
    /// Contains the limit.
    TooManySteps(usize),
    /// The solver itself got into an inconsistent state, typically through numerical trouble.
    InternalError(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::Malformed(message) => write!(f, "malformed problem: {}", message),
            SolveError::Infeasible(message) => write!(f, "infeasible: {}", message),
            SolveError::Unbounded(message) => write!(f, "unbounded: {}", message),
            SolveError::TooManySteps(limit) => write!(f, "no optimum found within {} pivots", limit),
            SolveError::InternalError(message) => write!(f, "internal error: {}", message),
        }
    }
}

impl Error for SolveError {}

impl From<StructureError> for SolveError {
    fn from(error: StructureError) -> Self {
        SolveError::Malformed(error.to_string())
    }
}
