// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded interning table for points.
//!
//! A [`PointInterner`] deduplicates points by their [`PointKey`] and hands out
//! small copyable [`PointId`] handles into an owned arena. The table is bounded:
//! once `limit` distinct points are stored, the next new point clears the arena
//! and starts a fresh generation. Handles from an older generation resolve to
//! `None` instead of aliasing a different point.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::point::{Point, PointKey};

/// Default number of distinct points kept before the table is recycled.
pub const DEFAULT_INTERN_LIMIT: usize = 1 << 16;

/// Handle to an interned point.
///
/// A slot index plus the generation of the table that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointId(u32, u32);

impl PointId {
    const fn slot(self) -> usize {
        self.0 as usize
    }

    /// Generation of the table that issued this handle.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// Owned, bounded arena of unique points.
#[derive(Clone, Debug)]
pub struct PointInterner {
    points: Vec<Point>,
    index: BTreeMap<PointKey, u32>,
    generation: u32,
    limit: usize,
}

impl Default for PointInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl PointInterner {
    /// Create an empty table with [`DEFAULT_INTERN_LIMIT`].
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_INTERN_LIMIT)
    }

    /// Create an empty table that holds at most `limit` points (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            points: Vec::new(),
            index: BTreeMap::new(),
            generation: 1,
            limit: limit.clamp(1, u32::MAX as usize),
        }
    }

    /// Intern `point`, returning the handle of an equal point if one is stored.
    pub fn intern(&mut self, point: Point) -> PointId {
        let key = point.key();
        if let Some(&slot) = self.index.get(&key) {
            return PointId(slot, self.generation);
        }
        if self.points.len() >= self.limit {
            self.clear();
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the limit is clamped to u32::MAX, so slots fit in 32 bits."
        )]
        let slot = self.points.len() as u32;
        self.points.push(point);
        self.index.insert(key, slot);
        PointId(slot, self.generation)
    }

    /// Resolve a handle. Returns `None` for handles from an older generation.
    pub fn get(&self, id: PointId) -> Option<&Point> {
        if id.generation() != self.generation {
            return None;
        }
        self.points.get(id.slot())
    }

    /// Handle of a stored point with this key, if any.
    pub fn lookup(&self, key: &PointKey) -> Option<PointId> {
        self.index
            .get(key)
            .map(|&slot| PointId(slot, self.generation))
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of stored points before the table recycles.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current generation. Bumped by every [`PointInterner::clear`].
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Drop every stored point and invalidate all outstanding handles.
    pub fn clear(&mut self) {
        self.points.clear();
        self.index.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}
