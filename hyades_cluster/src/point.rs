// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate points with broadcasting arithmetic and a stable identity key.
//!
//! Every operation takes an [`Operand`]: a scalar that is broadcast to every
//! axis, or a coordinate list of exactly the receiver's dimension (a `&Point`,
//! an array, a slice, or a `&Vec<f64>`). Mutations validate the whole operand
//! before writing, so a rejected call leaves the point untouched, and return
//! `&mut Self` so calls chain with `?`:
//!
//! ```
//! use hyades_cluster::Point;
//!
//! let mut p = Point::new([1.0, 2.0])?;
//! p.translate(1.0)?.scale_by(&[2.0, 0.5])?;
//! assert_eq!(p.coords(), &[4.0, 1.5]);
//! assert_eq!(p.distance_to(&[4.0, 1.5])?, 0.0);
//! # Ok::<(), hyades_cluster::Error>(())
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::float;

/// Right-hand side of a point operation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operand<'a> {
    /// One value applied to every axis.
    Scalar(f64),
    /// One value per axis.
    Coords(&'a [f64]),
}

impl Operand<'_> {
    /// Check that this operand can be applied to a `dim`-dimensional point.
    ///
    /// Fails with [`Error::DimensionMismatch`] for a list of the wrong length and
    /// with [`Error::InvalidArgument`] for any non-finite value.
    pub fn check(&self, dim: usize) -> Result<()> {
        match *self {
            Self::Scalar(v) => {
                if !v.is_finite() {
                    return Err(Error::non_finite("operand"));
                }
            }
            Self::Coords(coords) => {
                if coords.len() != dim {
                    return Err(Error::DimensionMismatch {
                        expected: dim,
                        found: coords.len(),
                    });
                }
                if coords.iter().any(|v| !v.is_finite()) {
                    return Err(Error::non_finite("operand"));
                }
            }
        }
        Ok(())
    }

    /// Value on `axis`. Callers must have passed [`Operand::check`] first.
    #[inline]
    pub(crate) fn axis(&self, axis: usize) -> f64 {
        match *self {
            Self::Scalar(v) => v,
            Self::Coords(coords) => coords[axis],
        }
    }
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(v: &'a [f64]) -> Self {
        Self::Coords(v)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Operand<'a> {
    fn from(v: &'a [f64; N]) -> Self {
        Self::Coords(v.as_slice())
    }
}

impl<'a> From<&'a Vec<f64>> for Operand<'a> {
    fn from(v: &'a Vec<f64>) -> Self {
        Self::Coords(v.as_slice())
    }
}

impl<'a> From<&'a Point> for Operand<'a> {
    fn from(p: &'a Point) -> Self {
        Self::Coords(&p.coords)
    }
}

/// A mutable point with a fixed number of finite coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coords: Vec<f64>,
}

impl Point {
    /// Create a point from a coordinate list.
    ///
    /// The list must be non-empty and every coordinate finite.
    pub fn new(coords: impl Into<Vec<f64>>) -> Result<Self> {
        let coords = coords.into();
        if coords.is_empty() {
            return Err(Error::InvalidArgument {
                name: "coords",
                message: "must have at least one axis",
            });
        }
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("coords"));
        }
        Ok(Self { coords })
    }

    /// Create a `dim`-dimensional point from an operand.
    ///
    /// A scalar is broadcast to every axis; a list must have `dim` entries.
    pub fn with_dim<'a>(dim: usize, value: impl Into<Operand<'a>>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidArgument {
                name: "dim",
                message: "must be at least 1",
            });
        }
        let value = value.into();
        value.check(dim)?;
        Ok(Self {
            coords: (0..dim).map(|i| value.axis(i)).collect(),
        })
    }

    /// Number of axes. Fixed at construction.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Coordinates, one per axis.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Identity key of the current coordinates.
    ///
    /// Computed from the coordinates on every call, so it always reflects the
    /// latest mutation.
    pub fn key(&self) -> PointKey {
        PointKey::from_coords(&self.coords)
    }

    /// Move by `delta`.
    pub fn translate<'a>(&mut self, delta: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.translate_scaled(delta, 1.0)
    }

    /// Move by `delta * factor` in a single pass.
    pub fn translate_scaled<'a>(
        &mut self,
        delta: impl Into<Operand<'a>>,
        factor: f64,
    ) -> Result<&mut Self> {
        if !factor.is_finite() {
            return Err(Error::non_finite("factor"));
        }
        self.apply(delta.into(), |c, d| c + d * factor)
    }

    /// Multiply each axis by `factor`.
    pub fn scale_by<'a>(&mut self, factor: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply(factor.into(), |c, f| c * f)
    }

    /// Replace the coordinates.
    pub fn jump_to<'a>(&mut self, coords: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply(coords.into(), |_, v| v)
    }

    /// Euclidean distance to `other`. Never mutates.
    pub fn distance_to<'a>(&self, other: impl Into<Operand<'a>>) -> Result<f64> {
        let other = other.into();
        other.check(self.dim())?;
        Ok(float::sqrt(self.squared_distance(other)))
    }

    /// Euclidean distances to each of `others`, in order.
    pub fn distances_to<'a, I>(&self, others: I) -> Result<Vec<f64>>
    where
        I: IntoIterator,
        I::Item: Into<Operand<'a>>,
    {
        others.into_iter().map(|o| self.distance_to(o)).collect()
    }

    pub(crate) fn squared_distance(&self, other: Operand<'_>) -> f64 {
        self.coords
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let d = c - other.axis(i);
                d * d
            })
            .sum()
    }

    fn apply(&mut self, op: Operand<'_>, f: impl Fn(f64, f64) -> f64) -> Result<&mut Self> {
        op.check(self.dim())?;
        // Validate every axis before writing any of them.
        if self
            .coords
            .iter()
            .enumerate()
            .any(|(i, &c)| !f(c, op.axis(i)).is_finite())
        {
            return Err(Error::InvalidArgument {
                name: "operand",
                message: "result would not be finite",
            });
        }
        for (i, c) in self.coords.iter_mut().enumerate() {
            *c = f(*c, op.axis(i));
        }
        Ok(self)
    }
}

/// Identity of a coordinate tuple, usable as a map key.
///
/// Built from the bit pattern of each coordinate with `-0.0` folded into `0.0`,
/// so two points with equal coordinates always produce equal keys. The `Ord`
/// implementation is deterministic but not numeric.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey(Box<[u64]>);

impl PointKey {
    /// Key for a coordinate list.
    pub fn from_coords(coords: &[f64]) -> Self {
        Self(coords.iter().map(|&v| canonical_bits(v)).collect())
    }

    /// Number of axes encoded in the key.
    pub fn dim(&self) -> usize {
        self.0.len()
    }
}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn scalar_broadcasts_to_every_axis() {
        let p = Point::with_dim(3, 2.5).unwrap();
        assert_eq!(p.coords(), &[2.5, 2.5, 2.5]);
        let q = Point::with_dim(2, &p.coords()[..2]).unwrap();
        assert_eq!(q.coords(), &[2.5, 2.5]);
    }

    #[test]
    fn construction_rejects_bad_input() {
        assert!(Point::new(Vec::<f64>::new()).unwrap_err().is_invalid_argument());
        assert!(Point::new([1.0, f64::NAN]).is_err());
        assert!(Point::new([f64::INFINITY, 0.0]).is_err());
        assert!(Point::with_dim(0, 1.0).is_err());
        assert_eq!(
            Point::with_dim(2, &[1.0, 2.0, 3.0]).unwrap_err(),
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn mutations_chain() {
        let mut p = Point::new([1.0, -1.0]).unwrap();
        p.translate(&[1.0, 1.0])
            .unwrap()
            .scale_by(3.0)
            .unwrap()
            .translate_scaled(&[1.0, 2.0], -2.0)
            .unwrap();
        assert_eq!(p.coords(), &[4.0, -4.0]);
        p.jump_to(0.5).unwrap();
        assert_eq!(p.coords(), &[0.5, 0.5]);
    }

    #[test]
    fn rejected_mutation_leaves_point_unchanged() {
        let mut p = Point::new([1.0, 2.0]).unwrap();
        assert!(p.translate(&[1.0, 2.0, 3.0]).is_err());
        assert!(p.scale_by(f64::NAN).is_err());
        assert!(p.translate_scaled(&[1.0, 1.0], f64::INFINITY).is_err());
        // 1e308 * 10 overflows on the first axis only.
        let mut big = Point::new([1e308, 1.0]).unwrap();
        assert!(big.scale_by(10.0).is_err());
        assert_eq!(big.coords(), &[1e308, 1.0]);
        assert_eq!(p.coords(), &[1.0, 2.0]);
    }

    #[test]
    fn distances() {
        let p = Point::new([0.0, 0.0]).unwrap();
        let q = Point::new([3.0, 4.0]).unwrap();
        assert_eq!(p.distance_to(&q).unwrap(), 5.0);
        assert_eq!(q.distance_to(&q).unwrap(), 0.0);
        assert_eq!(p.distance_to(1.0).unwrap(), 2.0_f64.sqrt());
        let ds = p
            .distances_to([&[3.0, 4.0], &[0.0, 1.0], &[6.0, 8.0]])
            .unwrap();
        assert_eq!(ds, vec![5.0, 1.0, 10.0]);
        assert!(p.distance_to(&[1.0]).is_err());
    }

    #[test]
    fn keys_follow_coordinates() {
        let a = Point::new([0.0, 1.5]).unwrap();
        let b = Point::new([-0.0, 1.5]).unwrap();
        assert_eq!(a.key(), b.key());

        let mut c = a.clone();
        c.translate(1.0).unwrap();
        assert_ne!(a.key(), c.key());
        assert_eq!(c.key(), PointKey::from_coords(&[1.0, 2.5]));
        assert_eq!(c.key().dim(), 2);
    }
}
