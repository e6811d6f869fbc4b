//! # Algorithms
//!
//! Solution methods for linear programs in canonical form, and the ways in which they can fail.
pub mod error;
pub mod two_phase;
