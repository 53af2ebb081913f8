// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned cache of cell points passed into every growth step.

use alloc::collections::BTreeMap;

use hyades_cluster::{DEFAULT_INTERN_LIMIT, Error, Point, PointId, PointInterner, Result};

use crate::types::Cell;

/// Bounded cache from grid cells to interned [`Point`]s.
///
/// Growth steps look up the same cells many times (as a frontier entry, then as
/// a neighbor of several others). The cache keeps one `Point` per cell up to its
/// limit, then recycles everything at once. Lookups go through a cell index,
/// so a hit allocates nothing.
#[derive(Clone, Debug, Default)]
pub struct GrowthCache {
    points: PointInterner,
    cells: BTreeMap<Cell, PointId>,
}

impl GrowthCache {
    /// Create a cache with [`DEFAULT_INTERN_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_INTERN_LIMIT)
    }

    /// Create a cache holding at most `limit` points.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            points: PointInterner::with_limit(limit),
            cells: BTreeMap::new(),
        }
    }

    /// The point at the center of `cell`.
    pub fn cell_point(&mut self, cell: Cell) -> Result<&Point> {
        let cached = self.cells.get(&cell).copied();
        let id = match cached.filter(|&id| self.points.get(id).is_some()) {
            Some(id) => id,
            None => {
                let generation = self.points.generation();
                let id = self.points.intern(Point::new(cell.coords())?);
                if self.points.generation() != generation {
                    self.cells.clear();
                }
                self.cells.insert(cell, id);
                id
            }
        };
        self.points.get(id).ok_or(Error::InvalidArgument {
            name: "cell",
            message: "cached point was evicted",
        })
    }

    /// Number of cached points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// How many times the cache has been recycled, plus one.
    pub fn generation(&self) -> u32 {
        self.points.generation()
    }

    /// Drop every cached point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.cells.clear();
    }
}
