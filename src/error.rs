//! Error types surfaced by distance bindings.

use std::fmt;
use std::io;

use thiserror::Error;

/// Identifies which side of a binding an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// the left-hand feature collection
    Left,
    /// the right-hand feature collection
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Recoverable errors returned by binding and parameter persistence
/// operations.
///
/// Contract violations (computing on an unbound binding, out-of-range
/// indices, mismatched vector dimensionality) are not represented here: they
/// indicate caller bugs and panic instead of returning a value.
#[derive(Debug, Error)]
pub enum DistanceError {
    /// The supplied handle is not the concrete feature collection type the
    /// formula requires. The binding is left unbound.
    #[error("{side} handle is not a dense float feature collection")]
    TypeMismatch {
        /// the side of the binding that was rejected
        side: Side,
    },

    /// Saving or loading formula parameters failed.
    #[error("parameter persistence failed: {0}")]
    Persistence(#[from] io::Error),
}
