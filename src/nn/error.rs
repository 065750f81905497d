//! Errors for the network composition layer.

use std::fmt;

/// Errors produced when building an MLP or pushing data through one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NnError {
    /// A slice handed to the model has the wrong length. Raised for forward
    /// inputs that do not match a layer's width and for flat parameter
    /// snapshots that do not match the parameter count. Inputs are never
    /// truncated or padded to fit.
    ShapeMismatch {
        /// Length the model expects.
        expected: usize,
        /// Length the caller supplied.
        got: usize,
    },

    /// An MLP needs at least one layer; an empty size list has no meaning.
    EmptyTopology,
}

impl fmt::Display for NnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} values, got {got}")
            }
            NnError::EmptyTopology => write!(f, "layer size list must not be empty"),
        }
    }
}

impl std::error::Error for NnError {}
