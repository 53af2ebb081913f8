// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hyades Cluster: weighted centroid clusters and a stable nearest-centroid classifier.
//!
//! Hyades Cluster is the numeric layer under a region-growth engine.
//!
//! - [`Point`]: an n-dimensional coordinate value whose operations accept a scalar
//!   (broadcast), a same-length list, or another point.
//! - [`Cluster`]: a centroid kept equal to `aggregate / members` by O(dim) updates,
//!   plus a frequency table of the exact weight held at each location.
//! - [`classify`]: rank clusters by centroid distance with a stable sort, so ties
//!   always go to the earliest cluster in the list.
//! - [`PointInterner`]: a bounded arena that deduplicates points by [`PointKey`].
//!
//! Every fallible call returns [`Result`]; a rejected call leaves its receiver
//! unchanged.
//!
//! # Example
//!
//! ```rust
//! use hyades_cluster::{Cluster, classify};
//!
//! let mut a = Cluster::from_coords([0.0, 0.0])?;
//! let b = Cluster::from_coords([10.0, 0.0])?;
//!
//! a.add(&[2.0, 0.0], 1.0)?;
//! assert_eq!(a.centroid().coords(), &[1.0, 0.0]);
//!
//! let clusters = [a, b];
//! let nearest = &classify(&[4.0, 0.0], &clusters, 1.0)?[0];
//! assert_eq!(nearest.index, 0);
//! assert_eq!(nearest.distance, 3.0);
//! # Ok::<(), hyades_cluster::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): float math through `std`.
//! - `libm`: float math through `libm` for `no_std` targets.
//!
//! One of the two must be enabled.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod cluster;
pub mod error;
mod float;
pub mod intern;
pub mod knn;
pub mod point;

pub use cluster::{Cluster, MembershipChange, SEED_WEIGHT, WEIGHT_EPSILON};
pub use error::{Error, Result};
pub use intern::{DEFAULT_INTERN_LIMIT, PointId, PointInterner};
pub use knn::{Centroid, Ranked, classify, nearest};
pub use point::{Operand, Point, PointKey};
