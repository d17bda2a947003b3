//! The trait that needs to be implemented by any distance formula, plus the
//! tag identifying each concrete formula.

use std::io::{Read, Write};

use crate::error::DistanceError;
use crate::features::Axis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies a concrete distance formula.
///
/// The tags and the names returned by [`MetricKind::name`] are stable:
/// external registries key off them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// the general L_k norm, see [`Minkowski`](crate::Minkowski)
    Minkowski,
    /// see [`JensenShannon`](crate::JensenShannon)
    JensenShannon,
}

impl MetricKind {
    /// Returns the stable display name of the formula.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Minkowski => "Minkowski",
            MetricKind::JensenShannon => "Jensen-Shannon",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait that needs to be implemented by any potential distance formula to
/// be used within a [`PairwiseDistance`](crate::PairwiseDistance) binding.
///
/// Formula parameters (such as the Minkowski exponent) live on the
/// implementor, are set at construction and are read-only afterwards, so
/// [`dist`](DistanceMetric::dist) is deterministic for a given instance.
pub trait DistanceMetric<A: Axis> {
    /// returns the tag identifying this formula
    fn kind(&self) -> MetricKind;

    /// returns the distance between two equal-length vectors, as measured by
    /// this formula
    fn dist(&self, a: &[A], b: &[A]) -> A;

    /// Writes the formula's parameters to `sink`.
    ///
    /// The default implementation covers formulas without parameters:
    /// nothing is written and the call trivially succeeds.
    fn save_params(&self, _sink: &mut dyn Write) -> Result<(), DistanceError> {
        Ok(())
    }

    /// Reads the formula's parameters back from `source`, replacing the
    /// instance's current parameters.
    ///
    /// The default implementation covers formulas without parameters:
    /// nothing is read and the call trivially succeeds.
    fn load_params(&mut self, _source: &mut dyn Read) -> Result<(), DistanceError> {
        Ok(())
    }
}
