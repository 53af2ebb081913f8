// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weighted clusters with an incrementally maintained centroid.
//!
//! A [`Cluster`] owns its centroid [`Point`] plus three pieces of bookkeeping:
//!
//! - `aggregate`: the weighted sum of every member coordinate,
//! - `members`: the total weight,
//! - a frequency table from [`PointKey`] to the weight held at that exact location.
//!
//! Each [`Cluster::add`] or [`Cluster::remove`] updates all three and then
//! recomputes the centroid as `aggregate / members` in O(dim), so the centroid
//! is exact without revisiting earlier members.
//!
//! Invariants:
//! - `centroid == aggregate / members` whenever `members > 0`.
//! - `members == sum(frequency)`; a zero frequency is never stored.
//! - Frequencies never go negative; a removal that would is rejected with
//!   [`Error::Underflow`] before anything changes.
//!
//! ```
//! use hyades_cluster::Cluster;
//!
//! let mut c = Cluster::from_coords([0.0, 0.0])?;
//! c.add(&[2.0, 0.0], 1.0)?;
//! assert_eq!(c.centroid().coords(), &[1.0, 0.0]);
//! c.remove(&[2.0, 0.0], 1.0)?;
//! assert_eq!(c.centroid().coords(), &[0.0, 0.0]);
//! assert_eq!(c.frequency_at(&[2.0, 0.0]), 0.0);
//! # Ok::<(), hyades_cluster::Error>(())
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::point::{Operand, Point, PointKey};

/// Smallest weight a cluster resolves.
///
/// Non-zero counts at or below this are rejected. A removal that leaves at
/// most this much at a location removes everything held there instead.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Weight given to the seed location of a new cluster.
pub const SEED_WEIGHT: f64 = 1.0;

/// A membership change reported by [`Cluster::add`] and [`Cluster::remove`].
///
/// The region-growth layer inspects this to seed new frontier cells.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipChange {
    /// Location whose weight changed.
    pub point: Point,
    /// Signed weight applied (negative for removals).
    pub delta: f64,
    /// Weight now held at `point`.
    pub frequency: f64,
    /// Total membership after the change.
    pub members: f64,
}

impl MembershipChange {
    /// Whether weight was added.
    pub fn is_growth(&self) -> bool {
        self.delta > 0.0
    }
}

/// A cluster of weighted points, identified by its centroid.
#[derive(Clone, Debug)]
pub struct Cluster {
    centroid: Point,
    aggregate: Vec<f64>,
    members: f64,
    frequency: BTreeMap<PointKey, f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Add,
    Remove,
}

impl Cluster {
    /// Create a cluster seeded at `seed` with [`SEED_WEIGHT`].
    ///
    /// The seed counts as a member and appears in the frequency table.
    pub fn new(seed: Point) -> Self {
        let mut frequency = BTreeMap::new();
        frequency.insert(seed.key(), SEED_WEIGHT);
        Self {
            aggregate: seed.coords().iter().map(|c| c * SEED_WEIGHT).collect(),
            centroid: seed,
            members: SEED_WEIGHT,
            frequency,
        }
    }

    /// Create a cluster seeded at a coordinate list.
    pub fn from_coords(coords: impl Into<Vec<f64>>) -> Result<Self> {
        Ok(Self::new(Point::new(coords)?))
    }

    /// Current centroid.
    pub fn centroid(&self) -> &Point {
        &self.centroid
    }

    /// Dimension of the centroid.
    pub fn dim(&self) -> usize {
        self.centroid.dim()
    }

    /// Total membership weight.
    pub fn members(&self) -> f64 {
        self.members
    }

    /// Running weighted sum of member coordinates.
    pub fn aggregate(&self) -> &[f64] {
        &self.aggregate
    }

    /// Euclidean distance from the centroid to `other`.
    pub fn distance_to<'a>(&self, other: impl Into<Operand<'a>>) -> Result<f64> {
        self.centroid.distance_to(other)
    }

    /// Weight held at `point`. Returns `0.0` for unseen or malformed points.
    pub fn frequency_at<'a>(&self, point: impl Into<Operand<'a>>) -> f64 {
        let Ok(point) = Point::with_dim(self.dim(), point) else {
            return 0.0;
        };
        self.frequency.get(&point.key()).copied().unwrap_or(0.0)
    }

    /// Frequency table entries in key order.
    pub fn frequencies(&self) -> impl Iterator<Item = (&PointKey, f64)> + '_ {
        self.frequency.iter().map(|(k, &w)| (k, w))
    }

    /// Number of distinct locations with non-zero weight.
    pub fn distinct_points(&self) -> usize {
        self.frequency.len()
    }

    /// Add `count` weight at `point`.
    ///
    /// A negative `count` removes weight, but unlike [`Cluster::remove`] it may
    /// not leave the cluster empty: fails with [`Error::InvalidArgument`] if
    /// `members` would drop to zero or below, and with [`Error::Underflow`] if
    /// the weight at `point` would go negative.
    pub fn add<'a>(&mut self, point: impl Into<Operand<'a>>, count: f64) -> Result<MembershipChange> {
        self.apply(point.into(), count, Direction::Add)
    }

    /// Remove `count` weight at `point`.
    ///
    /// `count` must be finite and non-negative. Fails with [`Error::Underflow`]
    /// if the weight at `point` or the total membership would go negative.
    /// Removing the last member is allowed: the aggregate resets to zero and the
    /// centroid stays where it was.
    pub fn remove<'a>(
        &mut self,
        point: impl Into<Operand<'a>>,
        count: f64,
    ) -> Result<MembershipChange> {
        if count < 0.0 {
            return Err(Error::InvalidArgument {
                name: "count",
                message: "must not be negative",
            });
        }
        self.apply(point.into(), -count, Direction::Remove)
    }

    fn apply(&mut self, point: Operand<'_>, delta: f64, direction: Direction) -> Result<MembershipChange> {
        if !delta.is_finite() {
            return Err(Error::non_finite("count"));
        }
        let point = Point::with_dim(self.dim(), point)?;
        let key = point.key();

        if delta != 0.0 && delta.abs() <= WEIGHT_EPSILON {
            return Err(Error::InvalidArgument {
                name: "count",
                message: "below weight resolution",
            });
        }

        let held = self.frequency.get(&key).copied().unwrap_or(0.0);
        let requested = -delta;
        let mut frequency = held + delta;
        if frequency < -WEIGHT_EPSILON {
            return Err(Error::Underflow {
                requested,
                available: held,
            });
        }
        // A removal that lands within epsilon of empty takes exactly what is
        // held, so the same amount leaves `members` and the aggregate.
        let mut delta = delta;
        if frequency.abs() <= WEIGHT_EPSILON {
            delta = -held;
            frequency = 0.0;
        }
        let members = snap(self.members + delta);
        match direction {
            Direction::Add if members <= 0.0 => {
                return Err(Error::InvalidArgument {
                    name: "count",
                    message: "cluster membership must stay positive",
                });
            }
            Direction::Remove if members < 0.0 => {
                return Err(Error::Underflow {
                    requested,
                    available: self.members,
                });
            }
            _ => {}
        }

        let aggregate: Vec<f64> = if members == 0.0 {
            alloc::vec![0.0; self.dim()]
        } else {
            self.aggregate
                .iter()
                .zip(point.coords())
                .map(|(a, c)| a + c * delta)
                .collect()
        };
        if aggregate.iter().any(|a| !a.is_finite()) {
            return Err(Error::InvalidArgument {
                name: "count",
                message: "aggregate would not be finite",
            });
        }

        self.aggregate = aggregate;
        if frequency == 0.0 {
            self.frequency.remove(&key);
        } else {
            self.frequency.insert(key, frequency);
        }
        self.members = members;
        if members > 0.0 {
            self.centroid
                .jump_to(self.aggregate.as_slice())?
                .scale_by(1.0 / members)?;
        }

        tracing::trace!(
            point = ?point.coords(),
            delta,
            members,
            centroid = ?self.centroid.coords(),
            "cluster membership changed"
        );

        Ok(MembershipChange {
            point,
            delta,
            frequency,
            members,
        })
    }
}

#[inline]
fn snap(v: f64) -> f64 {
    if v.abs() <= WEIGHT_EPSILON { 0.0 } else { v }
}
