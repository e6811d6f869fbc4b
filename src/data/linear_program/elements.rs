//! # Building blocks to describe linear programs.

/// A `Constraint` is a type of (in)equality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintType {
    Equal,
    Greater,
    Less,
}

impl ConstraintType {
    /// Coefficient of the slack variable that turns a constraint of this type into an equality.
    ///
    /// # Return value
    ///
    /// `None` for equality constraints, which don't need a slack.
    pub fn slack_coefficient(self) -> Option<f64> {
        match self {
            ConstraintType::Equal => None,
            ConstraintType::Greater => Some(-1_f64),
            ConstraintType::Less => Some(1_f64),
        }
    }
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

impl Objective {
    /// Factor to apply to the cost vector to get a minimization problem.
    pub fn sign(self) -> f64 {
        match self {
            Objective::Maximize => -1_f64,
            Objective::Minimize => 1_f64,
        }
    }
}
