// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growth strategy trait.

use hyades_cluster::Result;

use crate::cache::GrowthCache;
use crate::clusters::ClusterSet;
use crate::map::RegionMap;
use crate::report::GrowthReport;
use crate::types::{Cell, ClusterId};

/// A way of expanding cluster territory over a [`RegionMap`] one bounded step at a time.
///
/// Strategies own their queues; the cluster list, the map, and the cache are
/// passed in on every step. One step must finish before the next begins.
pub trait GrowthStrategy {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Queue `cell` as a starting point for cluster `id`.
    fn seed(&mut self, id: ClusterId, cell: Cell);

    /// Run one bounded batch of work and report the cells that changed.
    fn step<B>(
        &mut self,
        clusters: &mut ClusterSet,
        map: &mut RegionMap<B>,
        cache: &mut GrowthCache,
    ) -> Result<GrowthReport>
    where
        B: AsRef<[u32]> + AsMut<[u32]>;

    /// Whether no queued work remains.
    fn is_exhausted(&self) -> bool;

    /// Drop all queued work.
    fn reset(&mut self);
}
