// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cluster batch frontier growth with local contention.
//!
//! Every cluster keeps an `active` queue (processed this step) and a `next`
//! list (claimed this step, processed the step after). A step walks the
//! clusters in list order and, for each, pops up to `batch_size` active cells:
//!
//! 1. The cell itself is claimed if it is unclaimed (a fresh seed); if another
//!    cluster owns it, it is contested and dropped when lost.
//! 2. Each in-bounds neighbor is claimed if unclaimed, skipped if already owned,
//!    and contested if another cluster owns it. A won contest moves the cell and
//!    any weight the loser held there.
//! 3. With `hold_contested`, a cell with a lost neighbor is kept for next step.
//!
//! After all clusters have run, every drained `active` takes its `next`.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use hyades_cluster::Result;

use crate::cache::GrowthCache;
use crate::clusters::ClusterSet;
use crate::config::GrowthConfig;
use crate::map::RegionMap;
use crate::report::{GrowthReport, Reassignment};
use crate::strategy::GrowthStrategy;
use crate::types::{Cell, ClusterId, Tag};

/// Lifecycle of one cluster's frontier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrontierState {
    /// Nothing processed yet.
    #[default]
    Idle,
    /// Processed cells in the last step and still has work queued.
    Growing,
    /// Ran out of work. A new seed moves it back to growing.
    Exhausted,
}

/// Queues of one cluster.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    active: VecDeque<Cell>,
    next: Vec<Cell>,
    state: FrontierState,
}

impl Frontier {
    /// Cells to process in the current round.
    pub fn active(&self) -> impl Iterator<Item = Cell> + '_ {
        self.active.iter().copied()
    }

    /// Cells queued for the following round.
    pub fn next(&self) -> &[Cell] {
        &self.next
    }

    /// Current state.
    pub fn state(&self) -> FrontierState {
        self.state
    }

    /// Whether both queues are empty.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.next.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Claim {
    Owned,
    Claimed,
    Lost,
}

/// The batch frontier strategy.
#[derive(Clone, Debug)]
pub struct FrontierGrowth {
    config: GrowthConfig,
    frontiers: Vec<Frontier>,
}

impl FrontierGrowth {
    /// Create the strategy. Fails if `config` does not validate.
    pub fn new(config: GrowthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            frontiers: Vec::new(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Frontier of cluster `id`, if it was ever seeded.
    pub fn frontier(&self, id: ClusterId) -> Option<&Frontier> {
        self.frontiers.get(id.index())
    }
}

impl GrowthStrategy for FrontierGrowth {
    fn name(&self) -> &'static str {
        "frontier"
    }

    fn seed(&mut self, id: ClusterId, cell: Cell) {
        if self.frontiers.len() <= id.index() {
            self.frontiers.resize_with(id.index() + 1, Frontier::default);
        }
        let frontier = &mut self.frontiers[id.index()];
        if frontier.state == FrontierState::Exhausted {
            frontier.state = FrontierState::Idle;
        }
        frontier.active.push_back(cell);
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
        let mut ctx = Context {
            config: &self.config,
            clusters,
            map,
            cache,
            report: &mut report,
        };

        for id in ctx.clusters.ids() {
            let Some(frontier) = self.frontiers.get_mut(id.index()) else {
                continue;
            };
            if frontier.active.is_empty() {
                continue;
            }
            frontier.state = FrontierState::Growing;
            let take = ctx.config.batch_size.min(frontier.active.len());
            for _ in 0..take {
                let Some(cell) = frontier.active.pop_front() else {
                    break;
                };
                ctx.report.processed += 1;
                if ctx.try_claim(id, cell)? == Claim::Lost {
                    continue;
                }
                let mut held = false;
                let size = ctx.map.size();
                for n in size.neighbors(cell, ctx.config.directions) {
                    match ctx.try_claim(id, n)? {
                        Claim::Owned => {}
                        Claim::Claimed => frontier.next.push(n),
                        Claim::Lost => held |= ctx.config.hold_contested,
                    }
                }
                if held {
                    frontier.next.push(cell);
                    ctx.report.held += 1;
                }
            }
        }

        for frontier in &mut self.frontiers {
            if frontier.active.is_empty() {
                frontier.active.extend(frontier.next.drain(..));
            }
            if frontier.state == FrontierState::Growing && frontier.is_empty() {
                frontier.state = FrontierState::Exhausted;
            }
        }
        Ok(report)
    }

    fn is_exhausted(&self) -> bool {
        self.frontiers.iter().all(Frontier::is_empty)
    }

    fn reset(&mut self) {
        self.frontiers.clear();
    }
}

struct Context<'a, B> {
    config: &'a GrowthConfig,
    clusters: &'a mut ClusterSet,
    map: &'a mut RegionMap<B>,
    cache: &'a mut GrowthCache,
    report: &'a mut GrowthReport,
}

impl<B: AsRef<[u32]> + AsMut<[u32]>> Context<'_, B> {
    fn try_claim(&mut self, id: ClusterId, cell: Cell) -> Result<Claim> {
        let Some(tag) = self.clusters.tag(id) else {
            return Ok(Claim::Lost);
        };
        let Some(current) = self.map.get(cell) else {
            // Off-grid seeds never grow.
            return Ok(Claim::Lost);
        };
        if current == tag {
            return Ok(Claim::Owned);
        }
        let Some(other) = self.owner(current, cell) else {
            self.map.set(cell, tag);
            self.report.claimed.push((cell, id));
            return Ok(Claim::Claimed);
        };

        let point = self.cache.cell_point(cell)?;
        let winner = self
            .clusters
            .contest(point, id, other, self.config.contention)?;
        tracing::trace!(
            col = cell.col,
            row = cell.row,
            attacker = id.get(),
            defender = other.get(),
            winner = winner.get(),
            "contested cell"
        );
        if winner != id {
            return Ok(Claim::Lost);
        }
        self.map.set(cell, tag);
        let weight = self.clusters.transfer(point, other, id)?;
        self.report.reassigned.push(Reassignment {
            cell,
            from: other,
            to: id,
            weight,
        });
        Ok(Claim::Claimed)
    }

    /// Live cluster owning a cell tagged `tag`, or `None` if the cell is free.
    fn owner(&self, tag: Tag, cell: Cell) -> Option<ClusterId> {
        if tag.is_reserved() {
            return None;
        }
        let owner = self.clusters.by_tag(tag);
        if owner.is_none() {
            tracing::warn!(
                col = cell.col,
                row = cell.row,
                tag = tag.get(),
                "cell carries an unknown tag; overwriting"
            );
        }
        owner
    }
}
