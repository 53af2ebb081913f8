// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine: clusters, a growth strategy, and a cache behind one handle.

use alloc::vec::Vec;

use hyades_cluster::{Cluster, Error, MembershipChange, Operand, Point, Ranked, Result};

use crate::border::BorderGrowth;
use crate::cache::GrowthCache;
use crate::clusters::{ClusterSet, TaggedCluster};
use crate::config::GrowthConfig;
use crate::frontier::FrontierGrowth;
use crate::map::RegionMap;
use crate::report::GrowthReport;
use crate::strategy::GrowthStrategy;
use crate::types::{ClusterId, GridSize, Tag};

/// Dimension of cluster space for a 2D grid.
const GRID_DIM: usize = 2;

/// Region-growth engine over a fixed-size grid.
///
/// The engine owns the clusters and the strategy state; the tag buffer stays
/// with the caller and is passed to [`Engine::step`]. Membership changes that
/// add weight seed the owning cluster's growth at the point's cell.
#[derive(Clone, Debug)]
pub struct Engine<S = FrontierGrowth> {
    size: GridSize,
    clusters: ClusterSet,
    strategy: S,
    cache: GrowthCache,
}

impl Engine {
    /// Create an engine using [`FrontierGrowth`].
    pub fn new(width: u32, height: u32, config: GrowthConfig) -> Result<Self> {
        Ok(Self::with_strategy(
            width,
            height,
            FrontierGrowth::new(config)?,
        ))
    }
}

impl Engine<BorderGrowth> {
    /// Create an engine using [`BorderGrowth`].
    pub fn with_border_queue(width: u32, height: u32, config: GrowthConfig) -> Result<Self> {
        Ok(Self::with_strategy(
            width,
            height,
            BorderGrowth::new(config)?,
        ))
    }
}

impl<S: GrowthStrategy> Engine<S> {
    /// Create an engine around any strategy.
    pub fn with_strategy(width: u32, height: u32, strategy: S) -> Self {
        Self {
            size: GridSize::new(width, height),
            clusters: ClusterSet::new(),
            strategy,
            cache: GrowthCache::new(),
        }
    }

    /// Replace the cell cache.
    #[must_use]
    pub fn with_cache(mut self, cache: GrowthCache) -> Self {
        self.cache = cache;
        self
    }

    /// Grid dimensions.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// The clusters.
    pub fn clusters(&self) -> &ClusterSet {
        &self.clusters
    }

    /// Strategy state.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The cell cache.
    pub fn cache(&self) -> &GrowthCache {
        &self.cache
    }

    /// Whether the strategy has no queued work.
    pub fn is_exhausted(&self) -> bool {
        self.strategy.is_exhausted()
    }

    /// Create a cluster seeded at `seed` and painted with `tag`.
    ///
    /// Seeds must be two-dimensional. A seed outside the grid still classifies
    /// but does not grow until a point inside the grid is added.
    pub fn add_cluster(&mut self, seed: Point, tag: Tag) -> Result<ClusterId> {
        if seed.dim() != GRID_DIM {
            return Err(Error::DimensionMismatch {
                expected: GRID_DIM,
                found: seed.dim(),
            });
        }
        let cell = self.size.cell_at(seed.coords());
        let id = self.clusters.insert(tag, Cluster::new(seed))?;
        if let Some(cell) = cell {
            self.strategy.seed(id, cell);
        }
        tracing::debug!(cluster = id.get(), tag = tag.get(), "cluster added");
        Ok(id)
    }

    /// Add `count` weight at `point` to cluster `id` and seed growth there.
    pub fn add_point<'a>(
        &mut self,
        id: ClusterId,
        point: impl Into<Operand<'a>>,
        count: f64,
    ) -> Result<MembershipChange> {
        let change = self.clusters.add(id, point, count)?;
        self.observe(id, &change);
        Ok(change)
    }

    /// Remove `count` weight at `point` from cluster `id`.
    pub fn remove_point<'a>(
        &mut self,
        id: ClusterId,
        point: impl Into<Operand<'a>>,
        count: f64,
    ) -> Result<MembershipChange> {
        let change = self.clusters.remove(id, point, count)?;
        self.observe(id, &change);
        Ok(change)
    }

    /// Add `count` weight at `point` to its nearest cluster.
    pub fn assign<'a>(
        &mut self,
        point: impl Into<Operand<'a>>,
        count: f64,
    ) -> Result<(ClusterId, MembershipChange)> {
        let point = point.into();
        let id = self.clusters.nearest(point)?;
        Ok((id, self.add_point(id, point, count)?))
    }

    /// Rank the clusters by distance from `point`.
    pub fn classify<'a>(
        &self,
        point: impl Into<Operand<'a>>,
        k: f64,
    ) -> Result<Vec<Ranked<'_, TaggedCluster>>> {
        self.clusters.classify(point, k)
    }

    /// Run one growth step over `map`.
    ///
    /// Fails with [`Error::InvalidArgument`] if `map` does not have the engine's
    /// width and height.
    pub fn step<B>(&mut self, map: &mut RegionMap<B>) -> Result<GrowthReport>
    where
        B: AsRef<[u32]> + AsMut<[u32]>,
    {
        if map.size() != self.size {
            return Err(Error::InvalidArgument {
                name: "map",
                message: "size differs from the engine grid",
            });
        }
        let report = self
            .strategy
            .step(&mut self.clusters, map, &mut self.cache)?;
        tracing::debug!(
            strategy = self.strategy.name(),
            processed = report.processed,
            claimed = report.claimed.len(),
            reassigned = report.reassigned.len(),
            bordered = report.bordered.len(),
            held = report.held,
            "growth step"
        );
        Ok(report)
    }

    /// Step until the strategy runs out of work or `max_steps` steps have run.
    ///
    /// Returns the number of steps taken and the merged report.
    pub fn run_until_exhausted<B>(
        &mut self,
        map: &mut RegionMap<B>,
        max_steps: usize,
    ) -> Result<(usize, GrowthReport)>
    where
        B: AsRef<[u32]> + AsMut<[u32]>,
    {
        let mut total = GrowthReport::default();
        let mut steps = 0;
        while steps < max_steps && !self.strategy.is_exhausted() {
            total.absorb(self.step(map)?);
            steps += 1;
        }
        Ok((steps, total))
    }

    /// Drop every cluster, all queued work, and the cache.
    ///
    /// The caller clears its own map.
    pub fn reset(&mut self) {
        self.clusters = ClusterSet::new();
        self.strategy.reset();
        self.cache.clear();
    }

    fn observe(&mut self, id: ClusterId, change: &MembershipChange) {
        if !change.is_growth() {
            return;
        }
        if let Some(cell) = self.size.cell_at(change.point.coords()) {
            self.strategy.seed(id, cell);
        }
    }
}
