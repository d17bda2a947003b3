//! Contains the distance formulas that can be bound to a pair of feature
//! collections to score arbitrary vector pairs.

use std::io;
use std::io::{Read, Write};

use num_traits::NumCast;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distance_metric::{DistanceMetric, MetricKind};
use crate::error::DistanceError;
use crate::features::Axis;

/// The general Minkowski metric, also referred to as the L_k norm:
///
/// d(a, b) = (Σ |a_t − b_t|^k)^(1/k)
///
/// Special cases: the L_1 norm is the Manhattan distance and the L_2 norm is
/// the Euclidean distance; both are computed through the general formula
/// here, with no shortcut. As k grows the metric tends towards the Chebyshev
/// distance, which is a documented limiting case rather than something this
/// formula evaluates.
///
/// # Examples
///
/// ```rust
/// use pairdist::{DistanceMetric, Minkowski};
///
/// let euclidean: Minkowski<f64> = Minkowski::new(2.0);
///
/// assert_eq!(0.0, euclidean.dist(&[1.0, 2.0], &[1.0, 2.0]));
/// assert!((euclidean.dist(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minkowski<A> {
    k: A,
}

impl<A: Axis> Minkowski<A> {
    /// Creates the formula with exponent `k`.
    ///
    /// # Panics
    ///
    /// Panics unless `k` is a positive number. The norm is undefined for
    /// `k = 0` and not a metric for negative exponents.
    pub fn new(k: A) -> Self {
        assert!(k > A::zero(), "Minkowski exponent must be a positive number");

        Self { k }
    }

    /// Returns the exponent this instance was constructed with.
    #[inline]
    pub fn k(&self) -> A {
        self.k
    }
}

impl<A: Axis> DistanceMetric<A> for Minkowski<A> {
    fn kind(&self) -> MetricKind {
        MetricKind::Minkowski
    }

    #[inline]
    fn dist(&self, a: &[A], b: &[A]) -> A {
        a.iter()
            .zip(b.iter())
            .map(|(&a_val, &b_val)| (a_val - b_val).abs().powf(self.k))
            .fold(A::zero(), std::ops::Add::add)
            .powf(self.k.recip())
    }

    /// Writes the exponent as a little-endian IEEE-754 f64 (8 bytes).
    fn save_params(&self, sink: &mut dyn Write) -> Result<(), DistanceError> {
        let k = self.k.to_f64().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "exponent is not representable as f64",
            )
        })?;
        sink.write_all(&k.to_le_bytes())?;

        Ok(())
    }

    /// Reads an exponent previously written by
    /// [`save_params`](Minkowski::save_params), rejecting values that are
    /// not positive finite numbers.
    fn load_params(&mut self, source: &mut dyn Read) -> Result<(), DistanceError> {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf)?;

        let k = f64::from_le_bytes(buf);
        if !k.is_finite() || k <= 0.0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{k} is not a valid Minkowski exponent"),
            )
            .into());
        }

        self.k = <A as NumCast>::from(k).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "exponent is out of range for the axis type",
            )
        })?;

        Ok(())
    }
}

/// The Jensen-Shannon divergence between two non-negative vectors, comparing
/// each to their pointwise average (natural logarithm):
///
/// d(a, b) = Σ a_t·ln(a_t / m_t) + b_t·ln(b_t / m_t), with m_t = (a_t + b_t) / 2
///
/// A term whose numerator is not positive contributes nothing, which is the
/// standard x·ln(x) → 0 extension and also keeps ln away from zero and
/// negative arguments; a component where both vectors are zero contributes
/// nothing either. Inputs are treated as unnormalized non-negative
/// "distributions".
///
/// # Examples
///
/// ```rust
/// use pairdist::{DistanceMetric, JensenShannon};
///
/// let js = JensenShannon {};
///
/// assert_eq!(0.0, js.dist(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]));
///
/// // disjoint support: each side contributes ln 2
/// let d = js.dist(&[1.0, 0.0], &[0.0, 1.0]);
/// assert!((d - 2.0 * std::f64::consts::LN_2).abs() < 1e-15);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JensenShannon {}

impl<A: Axis> DistanceMetric<A> for JensenShannon {
    fn kind(&self) -> MetricKind {
        MetricKind::JensenShannon
    }

    #[inline]
    fn dist(&self, a: &[A], b: &[A]) -> A {
        let two = A::one() + A::one();

        a.iter()
            .zip(b.iter())
            .fold(A::zero(), |mut acc, (&a_val, &b_val)| {
                let mid = (a_val + b_val) / two;
                if a_val > A::zero() {
                    acc += a_val * (a_val / mid).ln();
                }
                if b_val > A::zero() {
                    acc += b_val * (b_val / mid).ln();
                }
                acc
            })
    }
}
