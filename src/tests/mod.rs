//! # Tests that require a look inside the crate.
//!
//! Each problem module exposes a `create` function building the problem, so that unit tests
//! elsewhere in the crate can reuse it, and tests solving it end to end.
