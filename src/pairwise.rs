//! The binding that pairs a distance formula with two feature collections
//! and scores arbitrary vector index pairs.

use std::io::{Read, Write};

#[cfg(feature = "tracing")]
use tracing::{event, Level};

use crate::distance_metric::{DistanceMetric, MetricKind};
use crate::error::{DistanceError, Side};
use crate::features::{Axis, DenseFeatures, Features};

/// A distance formula bound to a left- and a right-hand feature collection.
///
/// The binding borrows both collections (which may be the same collection)
/// for its active lifetime and never owns them. Bind once, then call
/// [`compute`](PairwiseDistance::compute) for as many index pairs as needed;
/// every call fetches, scores and releases the two vectors involved, with no
/// state carried between calls.
///
/// # Examples
///
/// ```rust
/// use pairdist::{DenseFeatures, Minkowski, PairwiseDistance};
///
/// let lhs = DenseFeatures::from_flat(vec![0.0, 0.0, 3.0, 4.0], 2);
/// let rhs = DenseFeatures::from_flat(vec![1.0, 1.0], 2);
///
/// let dist = PairwiseDistance::bound(Minkowski::new(1.0), &lhs, &rhs)?;
///
/// assert_eq!(dist.compute(0, 0), 2.0);
/// assert_eq!(dist.compute(1, 0), 5.0);
/// # Ok::<(), pairdist::DistanceError>(())
/// ```
#[derive(Debug)]
pub struct PairwiseDistance<'f, A: Axis, M: DistanceMetric<A>> {
    metric: M,
    lhs: Option<&'f DenseFeatures<A>>,
    rhs: Option<&'f DenseFeatures<A>>,
}

impl<'f, A: Axis, M: DistanceMetric<A>> PairwiseDistance<'f, A, M> {
    /// Creates an unbound binding carrying `metric`. Call
    /// [`bind`](PairwiseDistance::bind) before computing anything.
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            lhs: None,
            rhs: None,
        }
    }

    /// Creates a binding and binds it to `lhs` and `rhs` in one step.
    pub fn bound(
        metric: M,
        lhs: &'f dyn Features,
        rhs: &'f dyn Features,
    ) -> Result<Self, DistanceError> {
        let mut binding = Self::new(metric);
        binding.bind(lhs, rhs)?;

        Ok(binding)
    }

    /// Binds `lhs` and `rhs` as the left- and right-hand collections,
    /// replacing any previous binding.
    ///
    /// Each handle must be a [`DenseFeatures<A>`] matching the formula's
    /// axis type, otherwise [`DistanceError::TypeMismatch`] is returned and
    /// the binding is left unbound. Vector dimensionality is not checked
    /// here: it is checked per accessed pair inside
    /// [`compute`](PairwiseDistance::compute).
    pub fn bind(
        &mut self,
        lhs: &'f dyn Features,
        rhs: &'f dyn Features,
    ) -> Result<(), DistanceError> {
        self.release();

        let lhs = downcast::<A>(lhs, Side::Left)?;
        let rhs = downcast::<A>(rhs, Side::Right)?;

        self.lhs = Some(lhs);
        self.rhs = Some(rhs);

        #[cfg(feature = "tracing")]
        event!(
            Level::DEBUG,
            metric = %self.metric.kind(),
            left = lhs.count(),
            right = rhs.count(),
            "bound feature collections"
        );

        Ok(())
    }

    /// Drops both collection references. Idempotent: releasing an unbound
    /// binding is a no-op. The collections themselves are untouched.
    pub fn release(&mut self) {
        #[cfg(feature = "tracing")]
        if self.lhs.is_some() {
            event!(Level::DEBUG, metric = %self.metric.kind(), "released feature collections");
        }

        self.lhs = None;
        self.rhs = None;
    }

    /// Returns whether the binding currently holds both collections.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.lhs.is_some() && self.rhs.is_some()
    }

    /// Computes the distance between vector `i` of the left collection and
    /// vector `j` of the right collection.
    ///
    /// Both vectors are borrowed for the duration of the call and released
    /// again on every exit path. Repeated calls with the same pair on an
    /// unchanged binding return the same value.
    ///
    /// # Panics
    ///
    /// Panics if the binding is not active, if either index is out of range,
    /// or if the two vectors differ in length. All three are caller bugs, not
    /// data conditions, so no numeric result could meaningfully represent
    /// them.
    pub fn compute(&self, i: usize, j: usize) -> A {
        let (lhs, rhs) = match (self.lhs, self.rhs) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => panic!("compute called on an unbound distance"),
        };

        let a = lhs.vector(i);
        let b = rhs.vector(j);
        assert_eq!(
            a.len(),
            b.len(),
            "dimension mismatch between left vector {i} and right vector {j}"
        );

        self.metric.dist(&a, &b)
    }

    /// Returns the tag of the bound formula.
    pub fn kind(&self) -> MetricKind {
        self.metric.kind()
    }

    /// Returns the bound formula.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Writes the formula's parameters to `sink`; trivially succeeds for
    /// formulas without parameters.
    pub fn save_params(&self, sink: &mut dyn Write) -> Result<(), DistanceError> {
        self.metric.save_params(sink)
    }

    /// Reads the formula's parameters back from `source`; trivially succeeds
    /// for formulas without parameters.
    pub fn load_params(&mut self, source: &mut dyn Read) -> Result<(), DistanceError> {
        self.metric.load_params(source)
    }
}

fn downcast<A: Axis>(
    handle: &dyn Features,
    side: Side,
) -> Result<&DenseFeatures<A>, DistanceError> {
    handle
        .as_any()
        .downcast_ref::<DenseFeatures<A>>()
        .ok_or(DistanceError::TypeMismatch { side })
}
