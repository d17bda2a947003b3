//! Dense feature collections and the scoped accessor through which distance
//! bindings borrow individual feature vectors.

use std::any::Any;
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt::Debug;
use std::ops::Deref;

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis trait represents the traits that must be implemented
/// by the type used for feature vector components. This will be
/// [`f64`] or [`f32`].
pub trait Axis: Float + Default + Debug + Copy + Sync + Send + std::ops::AddAssign + 'static {}
impl<T: Float + Default + Debug + Copy + Sync + Send + std::ops::AddAssign + 'static> Axis for T {}

/// Capability trait implemented by any feature collection that can be handed
/// to [`PairwiseDistance::bind`](crate::PairwiseDistance::bind).
///
/// A binding downcasts the handle to the concrete collection type its
/// formula requires via [`as_any`](Features::as_any); handles of any other
/// concrete type are rejected at bind time with
/// [`DistanceError::TypeMismatch`](crate::DistanceError::TypeMismatch).
pub trait Features {
    /// returns the number of feature vectors stored in the collection
    fn count(&self) -> usize;

    /// returns the dimensionality shared by every vector in the collection
    fn dim(&self) -> usize;

    /// upcast used by bindings to recover the concrete collection type
    fn as_any(&self) -> &dyn Any;
}

/// A feature collection storing its vectors contiguously, row-major.
///
/// Every vector in the collection has the same dimensionality; the
/// constructors enforce this. The collection is only ever borrowed by
/// distance bindings and never mutated through them.
///
/// # Examples
///
/// ```rust
/// use pairdist::DenseFeatures;
///
/// let features = DenseFeatures::from_flat(vec![1.0, 2.0, 3.0, 4.0], 2);
///
/// assert_eq!(features.count(), 2);
/// assert_eq!(&*features.vector(1), &[3.0, 4.0]);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct DenseFeatures<A> {
    data: Vec<A>,
    dim: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    live_vectors: Cell<usize>,
}

// Equality is over the stored vectors only; the live-guard bookkeeping is
// transient state, skipped here just as it is for serde.
impl<A: PartialEq> PartialEq for DenseFeatures<A> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.dim == other.dim
    }
}

impl<A: Axis> DenseFeatures<A> {
    /// Creates a collection from a flat row-major buffer of `data.len() / dim`
    /// vectors.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero or `data.len()` is not a multiple of `dim`.
    pub fn from_flat(data: Vec<A>, dim: usize) -> Self {
        assert!(dim > 0, "dimensionality must be non-zero");
        assert_eq!(
            data.len() % dim,
            0,
            "flat data length must be a multiple of the dimensionality"
        );

        Self {
            data,
            dim,
            live_vectors: Cell::new(0),
        }
    }

    /// Creates a collection from one `Vec` per feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty or the rows do not all share one length.
    pub fn from_rows(rows: Vec<Vec<A>>) -> Self {
        let dim = rows.first().map_or(0, Vec::len);
        assert!(dim > 0, "a collection needs at least one non-empty vector");

        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in rows {
            assert_eq!(
                row.len(),
                dim,
                "all feature vectors in a collection must share one dimensionality"
            );
            data.extend(row);
        }

        Self {
            data,
            dim,
            live_vectors: Cell::new(0),
        }
    }

    /// Returns the number of feature vectors stored.
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Returns the dimensionality shared by every stored vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Borrows the feature vector at `idx` for the lifetime of the returned
    /// guard. The guard counts as an outstanding vector until it is dropped.
    ///
    /// Dense storage always lends a view; a collection that materialized
    /// vectors on demand would hand back an owned buffer instead, released
    /// identically when the guard drops.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[inline]
    pub fn vector(&self, idx: usize) -> FeatureVector<'_, A> {
        assert!(
            idx < self.count(),
            "vector index {idx} out of range for a collection of {} vectors",
            self.count()
        );

        let start = idx * self.dim;
        self.live_vectors.set(self.live_vectors.get() + 1);

        FeatureVector {
            data: Cow::Borrowed(&self.data[start..start + self.dim]),
            live: &self.live_vectors,
        }
    }

    /// Returns the number of vector guards currently alive against this
    /// collection. Zero whenever no computation is in flight.
    #[inline]
    pub fn outstanding_vectors(&self) -> usize {
        self.live_vectors.get()
    }
}

impl<A: Axis> Features for DenseFeatures<A> {
    fn count(&self) -> usize {
        self.count()
    }

    fn dim(&self) -> usize {
        self.dim()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Scoped borrow of a single feature vector.
///
/// Dereferences to the vector's components. Dropping the guard releases the
/// vector back to its collection, on every exit path including unwinding, so
/// fetch and release can never be mismatched.
#[derive(Debug)]
pub struct FeatureVector<'a, A: Axis> {
    data: Cow<'a, [A]>,
    live: &'a Cell<usize>,
}

impl<A: Axis> Deref for FeatureVector<'_, A> {
    type Target = [A];

    #[inline]
    fn deref(&self) -> &[A] {
        &self.data
    }
}

impl<A: Axis> Drop for FeatureVector<'_, A> {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::DenseFeatures;

    #[test]
    fn vectors_are_released_when_guards_drop() {
        let features = DenseFeatures::from_flat(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        assert_eq!(features.outstanding_vectors(), 0);

        {
            let a = features.vector(0);
            let b = features.vector(1);
            assert_eq!(features.outstanding_vectors(), 2);
            assert_eq!(&*a, &[1.0, 2.0, 3.0]);
            assert_eq!(&*b, &[4.0, 5.0, 6.0]);
        }

        assert_eq!(features.outstanding_vectors(), 0);
    }

    #[test]
    fn from_rows_flattens_in_order() {
        let features = DenseFeatures::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]]);

        assert_eq!(features.count(), 2);
        assert_eq!(features.dim(), 2);
        assert_eq!(&*features.vector(0), &[1.0, 2.0]);
        assert_eq!(&*features.vector(1), &[3.0, 4.0]);
    }

    #[test]
    fn equality_ignores_outstanding_guards() {
        let left = DenseFeatures::from_flat(vec![1.0f64, 2.0, 3.0, 4.0], 2);
        let right = DenseFeatures::from_flat(vec![1.0f64, 2.0, 3.0, 4.0], 2);

        let _guard = left.vector(0);
        assert_eq!(left.outstanding_vectors(), 1);
        assert_eq!(right.outstanding_vectors(), 0);

        assert_eq!(left, right);
    }

    #[test]
    #[should_panic(expected = "share one dimensionality")]
    fn ragged_rows_are_rejected() {
        DenseFeatures::from_rows(vec![vec![1.0f64, 2.0], vec![3.0]]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_is_rejected() {
        let features = DenseFeatures::from_flat(vec![1.0f64, 2.0], 2);
        features.vector(1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn can_serde() {
        let features = DenseFeatures::from_flat(vec![1.0f64, 2.0, 3.0, 4.0], 2);

        let serialized = serde_json::to_string(&features).unwrap();
        let deserialized: DenseFeatures<f64> = serde_json::from_str(&serialized).unwrap();

        assert_eq!(features, deserialized);
    }
}
