//! # A warm-startable linear program solver
//!
//! Linear programs of the form `min c^T x` subject to `A x = b` and `x >= 0` are solved using the
//! two-phase revised simplex method with an explicitly maintained basis inverse. The basis of a
//! solution can be passed back in to warm start a related problem.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;

#[cfg(test)]
mod tests;
