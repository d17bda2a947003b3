#![doc(html_root_url = "https://docs.rs/pairdist/0.4.0")]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::private_intra_doc_links)]

//! # Pairdist
//!
//! Pairwise dissimilarity scores between feature vectors drawn from two
//! (possibly identical) feature collections, as a building block for
//! similarity-based learning such as nearest-neighbour classification and
//! clustering.
//!
//! A [`PairwiseDistance`] binds a distance formula to a left- and a
//! right-hand [`DenseFeatures`] collection; once bound, it scores arbitrary
//! index pairs with [`compute`](PairwiseDistance::compute). Formulas
//! implement [`DistanceMetric`] and carry their own parameters; two ship
//! with the crate:
//!
//! - [`Minkowski`], the general L_k norm with a per-instance exponent
//!   (L_1 = Manhattan, L_2 = Euclidean);
//! - [`JensenShannon`], the Jensen-Shannon divergence over non-negative
//!   vectors.
//!
//! ## Installation
//!
//! Add `pairdist` to `Cargo.toml`
//! ```toml
//! [dependencies]
//! pairdist = "0.4"
//! ```
//!
//! ## Usage
//! ```rust
//! use pairdist::{DenseFeatures, JensenShannon, Minkowski, PairwiseDistance};
//!
//! let lhs = DenseFeatures::from_flat(vec![0.0, 0.0, 3.0, 4.0], 2);
//! let rhs = DenseFeatures::from_flat(vec![1.0, 1.0], 2);
//!
//! let euclidean = PairwiseDistance::bound(Minkowski::new(2.0), &lhs, &rhs)?;
//! assert!((euclidean.compute(0, 0) - 2f64.sqrt()).abs() < 1e-12);
//! assert!((euclidean.compute(1, 0) - 13f64.sqrt()).abs() < 1e-12);
//!
//! // the same collection may sit on both sides
//! let js: PairwiseDistance<f64, _> = PairwiseDistance::bound(JensenShannon {}, &lhs, &lhs)?;
//! assert_eq!(js.compute(1, 1), 0.0);
//! # Ok::<(), pairdist::DistanceError>(())
//! ```

#[cfg(feature = "serde")]
extern crate serde;
#[cfg(feature = "serde")]
extern crate serde_derive;

pub mod distance;
pub mod distance_metric;
pub mod error;
pub mod features;
pub mod pairwise;

pub use crate::distance::{JensenShannon, Minkowski};
pub use crate::distance_metric::{DistanceMetric, MetricKind};
pub use crate::error::{DistanceError, Side};
pub use crate::features::{Axis, DenseFeatures, FeatureVector, Features};
pub use crate::pairwise::PairwiseDistance;
