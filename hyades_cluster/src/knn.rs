// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable k-nearest classification by centroid distance.
//!
//! [`classify`] ranks a list of clusters by Euclidean distance from a point to
//! each centroid. The sort is stable: clusters at equal distance keep their
//! input order, so the first-listed cluster wins every tie.
//!
//! ```
//! use hyades_cluster::{Cluster, classify};
//!
//! let clusters = [
//!     Cluster::from_coords([0.0, 0.0])?,
//!     Cluster::from_coords([4.0, 4.0])?,
//! ];
//! let ranked = classify(&[2.0, 2.0], &clusters, 2.0)?;
//! // Equidistant: input order decides.
//! assert_eq!(ranked[0].index, 0);
//! assert_eq!(ranked[1].index, 1);
//! # Ok::<(), hyades_cluster::Error>(())
//! ```

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::float;
use crate::point::{Operand, Point};

/// Anything with a centroid that can be ranked by [`classify`].
pub trait Centroid {
    /// Current centroid.
    fn centroid(&self) -> &Point;
}

impl Centroid for Point {
    fn centroid(&self) -> &Point {
        self
    }
}

impl Centroid for Cluster {
    fn centroid(&self) -> &Point {
        Self::centroid(self)
    }
}

impl<T: Centroid + ?Sized> Centroid for &T {
    fn centroid(&self) -> &Point {
        (**self).centroid()
    }
}

/// One classification result.
#[derive(Debug)]
pub struct Ranked<'a, C> {
    /// The ranked cluster.
    pub cluster: &'a C,
    /// Distance from the query point to its centroid.
    pub distance: f64,
    /// Position of the cluster in the input list.
    pub index: usize,
}

impl<C> Clone for Ranked<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Ranked<'_, C> {}

/// Rank `clusters` by distance from `point` and return the nearest `k`.
///
/// `k` is rounded to the nearest integer and clamped to `clusters.len()`.
///
/// Fails with [`Error::InvalidArgument`] when `clusters` is empty, when `k` is
/// not finite or is below one, and with [`Error::DimensionMismatch`] when
/// `point` does not match a centroid's dimension.
pub fn classify<'a, 'p, C: Centroid>(
    point: impl Into<Operand<'p>>,
    clusters: &'a [C],
    k: f64,
) -> Result<Vec<Ranked<'a, C>>> {
    if clusters.is_empty() {
        return Err(Error::InvalidArgument {
            name: "clusters",
            message: "must not be empty",
        });
    }
    if !k.is_finite() {
        return Err(Error::non_finite("k"));
    }
    if k < 1.0 {
        return Err(Error::InvalidArgument {
            name: "k",
            message: "must be at least 1",
        });
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "k is finite and at least 1; `as` saturates anything past usize::MAX."
    )]
    let k = (float::round(k) as usize).min(clusters.len());

    let point = point.into();
    let mut ranked = clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            Ok(Ranked {
                cluster,
                distance: cluster.centroid().distance_to(point)?,
                index,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    // Distances are finite, so `partial_cmp` never fails; `sort_by` is stable.
    ranked.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    Ok(ranked)
}

/// The single nearest cluster to `point`, ties going to the earliest.
pub fn nearest<'a, 'p, C: Centroid>(
    point: impl Into<Operand<'p>>,
    clusters: &'a [C],
) -> Result<Ranked<'a, C>> {
    let mut ranked = classify(point, clusters, 1.0)?;
    ranked.pop().ok_or(Error::InvalidArgument {
        name: "clusters",
        message: "must not be empty",
    })
}
