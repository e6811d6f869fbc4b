//! # Strategies
//!
//! Choices the simplex method makes that don't affect correctness, only the path taken.
pub mod inspection_order;
pub mod pivot_rule;
