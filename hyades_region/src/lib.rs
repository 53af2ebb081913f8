// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hyades Region: incremental Voronoi-like region growth over a 2D tag grid.
//!
//! Hyades Region partitions a `width * height` grid among a set of clusters from
//! [`hyades_cluster`], one bounded step at a time.
//!
//! - [`RegionMap`] is a flat buffer of 32-bit [`Tag`]s, one per cell. It can wrap
//!   a caller's buffer, so a renderer can grow regions straight into its pixels.
//! - [`FrontierGrowth`] expands every cluster from its own frontier. When two
//!   frontiers meet, the contested cell is reclassified and goes (with any
//!   weight the loser held there) to the nearer cluster.
//! - [`BorderGrowth`] drives one shared queue and paints cells on a boundary
//!   with [`Tag::BORDER`].
//! - [`Engine`] ties a [`ClusterSet`], a strategy, and a [`GrowthCache`]
//!   together and seeds growth whenever a cluster gains weight.
//!
//! Each step returns a [`GrowthReport`] whose [`bounds`](GrowthReport::bounds)
//! cover every changed cell.
//!
//! # Example
//!
//! ```rust
//! use hyades_cluster::Point;
//! use hyades_region::{Cell, Engine, GrowthConfig, RegionMap, Tag};
//!
//! let red = Tag::from_rgb(255, 0, 0);
//! let blue = Tag::from_rgb(0, 0, 255);
//!
//! let mut engine = Engine::new(5, 5, GrowthConfig::unbounded())?;
//! engine.add_cluster(Point::new([0.0, 0.0])?, red)?;
//! engine.add_cluster(Point::new([4.0, 4.0])?, blue)?;
//!
//! let mut map = RegionMap::new(5, 5);
//! let (steps, report) = engine.run_until_exhausted(&mut map, 100)?;
//! assert!(steps > 0);
//! assert_eq!(report.bounds(), Some(map.bounds()));
//!
//! // Every cell is owned; the tie on the anti-diagonal goes to the first cluster.
//! assert_eq!(map.claimed(), 25);
//! assert_eq!(map.get(Cell::new(2, 2)), Some(red));
//! # Ok::<(), hyades_cluster::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwarded to Kurbo, `tracing`, and `hyades_cluster`.
//! - `libm`: `no_std` float math for Kurbo and `hyades_cluster`.

#![no_std]

extern crate alloc;

pub mod border;
pub mod cache;
pub mod clusters;
pub mod config;
pub mod deque;
pub mod engine;
pub mod frontier;
pub mod map;
pub mod report;
pub mod strategy;
pub mod types;

pub use border::BorderGrowth;
pub use cache::GrowthCache;
pub use clusters::{ClusterSet, TaggedCluster};
pub use config::{Contention, DEFAULT_BATCH_SIZE, GrowthConfig};
pub use deque::{DEFAULT_COMPACT_THRESHOLD, Deque};
pub use engine::Engine;
pub use frontier::{Frontier, FrontierGrowth, FrontierState};
pub use hyades_cluster::{Error, Result};
pub use map::RegionMap;
pub use report::{GrowthReport, Reassignment};
pub use strategy::GrowthStrategy;
pub use types::{Cell, ClusterId, Directions, GridSize, Tag};
