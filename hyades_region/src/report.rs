// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-step change summary returned by [`GrowthStrategy::step`](crate::GrowthStrategy::step).

use alloc::vec::Vec;

use kurbo::Rect;

use crate::types::{Cell, ClusterId};

/// A contested cell that changed owner, together with the weight that followed it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reassignment {
    /// The cell.
    pub cell: Cell,
    /// Previous owner.
    pub from: ClusterId,
    /// New owner.
    pub to: ClusterId,
    /// Weight moved from `from` to `to`; `0.0` if `from` held none at this cell.
    pub weight: f64,
}

/// Cells touched by one growth step.
#[derive(Clone, Debug, Default)]
pub struct GrowthReport {
    /// Previously unclaimed (or border) cells that received an owner.
    pub claimed: Vec<(Cell, ClusterId)>,
    /// Cells taken from another cluster.
    pub reassigned: Vec<Reassignment>,
    /// Cells painted with the border marker.
    pub bordered: Vec<Cell>,
    /// Frontier cells kept for a retry after losing a contest.
    pub held: usize,
    /// Queue entries consumed.
    pub processed: usize,
}

impl GrowthReport {
    /// True if no cell changed.
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty() && self.reassigned.is_empty() && self.bordered.is_empty()
    }

    /// Number of cells whose tag changed.
    pub fn changed(&self) -> usize {
        self.claimed.len() + self.reassigned.len() + self.bordered.len()
    }

    /// Union of the bounds of every changed cell. Returns `None` if empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut it = self
            .claimed
            .iter()
            .map(|(c, _)| *c)
            .chain(self.reassigned.iter().map(|r| r.cell))
            .chain(self.bordered.iter().copied())
            .map(Cell::bounds);
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    pub(crate) fn absorb(&mut self, other: Self) {
        self.claimed.extend(other.claimed);
        self.reassigned.extend(other.reassigned);
        self.bordered.extend(other.bordered);
        self.held += other.held;
        self.processed += other.processed;
    }
}
