// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growth configuration.

use hyades_cluster::{Error, Result};

use crate::types::Directions;

/// Default number of frontier cells processed per cluster per step.
pub const DEFAULT_BATCH_SIZE: usize = 300;

/// Which clusters take part when a cell owned by one cluster is reached by another.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Contention {
    /// Only the attacking and the defending cluster are ranked.
    #[default]
    Pair,
    /// Every cluster is ranked. The attacker claims the cell only if it ranks
    /// first; a third cluster winning leaves the cell with its owner.
    All,
}

/// Knobs shared by both growth strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GrowthConfig {
    /// Cells taken from a queue per step. `usize::MAX` means no limit.
    pub batch_size: usize,
    /// Neighborhood used for expansion.
    pub directions: Directions,
    /// Contest participants.
    pub contention: Contention,
    /// Keep a frontier cell that lost a contest for a retry next step.
    pub hold_contested: bool,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            directions: Directions::all(),
            contention: Contention::Pair,
            hold_contested: false,
        }
    }
}

impl GrowthConfig {
    /// Process whole frontiers each step.
    pub fn unbounded() -> Self {
        Self::default().with_batch_size(usize::MAX)
    }

    /// Set [`GrowthConfig::batch_size`].
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set [`GrowthConfig::directions`].
    #[must_use]
    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }

    /// Set [`GrowthConfig::contention`].
    #[must_use]
    pub fn with_contention(mut self, contention: Contention) -> Self {
        self.contention = contention;
        self
    }

    /// Set [`GrowthConfig::hold_contested`].
    #[must_use]
    pub fn with_hold_contested(mut self, hold: bool) -> Self {
        self.hold_contested = hold;
        self
    }

    /// Check the configuration.
    ///
    /// Fails with [`Error::InvalidArgument`] for a zero batch size or an empty
    /// direction set.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidArgument {
                name: "batch_size",
                message: "must be at least 1",
            });
        }
        if self.directions.is_empty() {
            return Err(Error::InvalidArgument {
                name: "directions",
                message: "must not be empty",
            });
        }
        Ok(())
    }
}
