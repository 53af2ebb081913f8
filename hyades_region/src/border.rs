// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-queue growth with a border overlay.
//!
//! Cells waiting for a check carry [`Tag::BORDER`] in the map and sit in one
//! shared [`Deque`]. Checking a cell classifies it and each neighbor against
//! the full cluster list:
//!
//! - If every neighbor has the same nearest cluster, the cell is painted with
//!   that cluster's tag and its unpainted neighbors are marked and queued.
//! - Otherwise the cell is on a boundary. It stays marked and is queued again,
//!   and neighbors belonging to other clusters are marked and queued.
//!
//! Boundary cells are re-checked every round, so with two or more clusters the
//! queue never drains; callers bound the number of steps.

use alloc::vec::Vec;

use hyades_cluster::Result;

use crate::cache::GrowthCache;
use crate::clusters::ClusterSet;
use crate::config::GrowthConfig;
use crate::deque::Deque;
use crate::map::RegionMap;
use crate::report::{GrowthReport, Reassignment};
use crate::strategy::GrowthStrategy;
use crate::types::{Cell, ClusterId, Tag};

/// The border-queue strategy.
#[derive(Clone, Debug)]
pub struct BorderGrowth {
    config: GrowthConfig,
    queue: Deque<Cell>,
    pending: Vec<Cell>,
}

impl BorderGrowth {
    /// Create the strategy. Fails if `config` does not validate.
    pub fn new(config: GrowthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            queue: Deque::new(),
            pending: Vec::new(),
        })
    }

    /// Use a queue with a custom compaction threshold.
    #[must_use]
    pub fn with_queue(mut self, queue: Deque<Cell>) -> Self {
        self.queue = queue;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Cells waiting for a border check, front to back.
    pub fn queued(&self) -> impl Iterator<Item = Cell> + '_ {
        self.queue.iter().copied()
    }

    fn mark<B>(&mut self, map: &mut RegionMap<B>, cell: Cell, report: &mut GrowthReport)
    where
        B: AsRef<[u32]> + AsMut<[u32]>,
    {
        if map.set(cell, Tag::BORDER).is_some() {
            self.queue.push(cell);
            report.bordered.push(cell);
        }
    }

    fn check<B>(
        &mut self,
        cell: Cell,
        clusters: &mut ClusterSet,
        map: &mut RegionMap<B>,
        cache: &mut GrowthCache,
        report: &mut GrowthReport,
    ) -> Result<()>
    where
        B: AsRef<[u32]> + AsMut<[u32]>,
    {
        if map.get(cell) != Some(Tag::BORDER) {
            return Ok(());
        }
        let point = cache.cell_point(cell)?.clone();
        let curr = clusters.nearest(&point)?;
        let Some(curr_tag) = clusters.tag(curr) else {
            return Ok(());
        };

        // The nearest cluster takes every count held at this cell.
        let others: Vec<ClusterId> = clusters.ids().filter(|&id| id != curr).collect();
        for other in others {
            let weight = clusters.transfer(&point, other, curr)?;
            if weight > 0.0 {
                report.reassigned.push(Reassignment {
                    cell,
                    from: other,
                    to: curr,
                    weight,
                });
            }
        }

        let size = map.size();
        let mut neighbors = Vec::new();
        for n in size.neighbors(cell, self.config.directions) {
            neighbors.push((n, clusters.nearest(cache.cell_point(n)?)?));
        }
        let on_border = neighbors.iter().any(|&(_, id)| id != curr);
        tracing::trace!(
            col = cell.col,
            row = cell.row,
            cluster = curr.get(),
            on_border,
            "border check"
        );

        if on_border {
            self.queue.push(cell);
            for (n, id) in neighbors {
                if id != curr && map.get(n) != Some(Tag::BORDER) {
                    self.mark(map, n, report);
                }
            }
        } else {
            map.set(cell, curr_tag);
            report.claimed.push((cell, curr));
            for (n, _) in neighbors {
                let tag = map.get(n);
                if tag != Some(Tag::BORDER) && tag != Some(curr_tag) {
                    self.mark(map, n, report);
                }
            }
        }
        Ok(())
    }
}

impl GrowthStrategy for BorderGrowth {
    fn name(&self) -> &'static str {
        "border"
    }

    /// Seeds are shared: the cell is classified when checked, so `id` is unused.
    fn seed(&mut self, _id: ClusterId, cell: Cell) {
        self.pending.push(cell);
    }

    fn step<B>(
        &mut self,
        clusters: &mut ClusterSet,
        map: &mut RegionMap<B>,
        cache: &mut GrowthCache,
    ) -> Result<GrowthReport>
    where
        B: AsRef<[u32]> + AsMut<[u32]>,
    {
        let mut report = GrowthReport::default();
        for cell in core::mem::take(&mut self.pending) {
            if map.get(cell) != Some(Tag::BORDER) {
                self.mark(map, cell, &mut report);
            } else {
                self.queue.push(cell);
            }
        }
        if clusters.is_empty() {
            return Ok(report);
        }

        let take = self.config.batch_size.min(self.queue.len());
        for _ in 0..take {
            let Some(cell) = self.queue.pop() else {
                break;
            };
            report.processed += 1;
            self.check(cell, clusters, map, cache, &mut report)?;
        }
        Ok(report)
    }

    fn is_exhausted(&self) -> bool {
        self.queue.is_empty() && self.pending.is_empty()
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }
}
