//! Small array helpers used throughout the crate.
//!
//! `Array2` is a row-major matrix used both for numeric feature matrices and
//! for raw string tables. `vector` holds slice helpers for the numeric path.
pub mod matrix;
pub mod vector;

pub use matrix::Array2;
pub use vector::{dot, mean};
