// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged cluster list with tag lookup and transactional weight transfer.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use hyades_cluster::{
    Centroid, Cluster, Error, MembershipChange, Operand, Point, Ranked, Result, classify,
};

use crate::config::Contention;
use crate::types::{ClusterId, Tag};

/// A cluster together with the tag it paints into the region map.
#[derive(Clone, Debug)]
pub struct TaggedCluster {
    tag: Tag,
    cluster: Cluster,
}

impl TaggedCluster {
    /// Tag written for cells this cluster owns.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The cluster statistics.
    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }
}

impl Centroid for TaggedCluster {
    fn centroid(&self) -> &Point {
        self.cluster.centroid()
    }
}

/// Ordered list of clusters, addressable by [`ClusterId`] or by [`Tag`].
///
/// Clusters are never removed, so ids stay dense and list order (which breaks
/// classification ties) equals id order.
#[derive(Clone, Debug, Default)]
pub struct ClusterSet {
    entries: Vec<TaggedCluster>,
    by_tag: BTreeMap<Tag, ClusterId>,
}

impl ClusterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `cluster` under `tag`.
    ///
    /// Fails with [`Error::InvalidArgument`] if `tag` is reserved or already used.
    pub fn insert(&mut self, tag: Tag, cluster: Cluster) -> Result<ClusterId> {
        if tag.is_reserved() {
            return Err(Error::InvalidArgument {
                name: "tag",
                message: "reserved tag",
            });
        }
        if self.by_tag.contains_key(&tag) {
            return Err(Error::InvalidArgument {
                name: "tag",
                message: "already in use",
            });
        }
        let id = ClusterId(u32::try_from(self.entries.len()).map_err(|_| {
            Error::InvalidArgument {
                name: "cluster",
                message: "too many clusters",
            }
        })?);
        self.entries.push(TaggedCluster { tag, cluster });
        self.by_tag.insert(tag, id);
        Ok(id)
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cluster for `id`.
    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.entries.get(id.index()).map(|e| &e.cluster)
    }

    /// Tag for `id`.
    pub fn tag(&self, id: ClusterId) -> Option<Tag> {
        self.entries.get(id.index()).map(|e| e.tag)
    }

    /// Cluster id painting `tag`.
    pub fn by_tag(&self, tag: Tag) -> Option<ClusterId> {
        self.by_tag.get(&tag).copied()
    }

    /// Ids in list order.
    pub fn ids(&self) -> impl Iterator<Item = ClusterId> + use<> {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "insert refuses more than u32::MAX clusters."
        )]
        let len = self.entries.len() as u32;
        (0..len).map(ClusterId)
    }

    /// Clusters in list order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &TaggedCluster)> + '_ {
        self.ids().zip(self.entries.iter())
    }

    /// Tagged entries in list order.
    pub fn as_slice(&self) -> &[TaggedCluster] {
        &self.entries
    }

    /// Add `count` weight at `point` to cluster `id`.
    pub fn add<'a>(
        &mut self,
        id: ClusterId,
        point: impl Into<Operand<'a>>,
        count: f64,
    ) -> Result<MembershipChange> {
        self.get_mut(id)?.add(point, count)
    }

    /// Remove `count` weight at `point` from cluster `id`.
    pub fn remove<'a>(
        &mut self,
        id: ClusterId,
        point: impl Into<Operand<'a>>,
        count: f64,
    ) -> Result<MembershipChange> {
        self.get_mut(id)?.remove(point, count)
    }

    /// Classify `point` over every cluster.
    pub fn classify<'a>(
        &self,
        point: impl Into<Operand<'a>>,
        k: f64,
    ) -> Result<Vec<Ranked<'_, TaggedCluster>>> {
        classify(point, &self.entries, k)
    }

    /// Nearest cluster over the whole list.
    pub fn nearest<'a>(&self, point: impl Into<Operand<'a>>) -> Result<ClusterId> {
        let ranked = hyades_cluster::nearest(point, &self.entries)?;
        Ok(self.id_at(ranked.index))
    }

    /// Winner of a contest for `point` between `attacker` and `defender`.
    ///
    /// Under [`Contention::Pair`] only the two are ranked, in list order so that a
    /// tie goes to the lower id; under [`Contention::All`] the whole list is.
    pub fn contest<'a>(
        &self,
        point: impl Into<Operand<'a>>,
        attacker: ClusterId,
        defender: ClusterId,
        contention: Contention,
    ) -> Result<ClusterId> {
        match contention {
            Contention::All => self.nearest(point),
            Contention::Pair => {
                let (lo, hi) = if attacker <= defender {
                    (attacker, defender)
                } else {
                    (defender, attacker)
                };
                let pair = [self.entry(lo)?, self.entry(hi)?];
                let ranked = hyades_cluster::nearest(point, &pair)?;
                Ok(if ranked.index == 0 { lo } else { hi })
            }
        }
    }

    /// Move all weight `from` holds at `point` over to `to`.
    ///
    /// Returns the weight moved, `0.0` when `from` held none. The removal and the
    /// addition happen together: if the addition fails the removal is undone.
    pub fn transfer(&mut self, point: &Point, from: ClusterId, to: ClusterId) -> Result<f64> {
        if from == to {
            return Ok(0.0);
        }
        let (src, dst) = self.pair_mut(from, to)?;
        let weight = src.frequency_at(point);
        if weight <= 0.0 {
            return Ok(0.0);
        }
        src.remove(point, weight)?;
        if let Err(err) = dst.add(point, weight) {
            src.add(point, weight)?;
            return Err(err);
        }
        tracing::trace!(
            point = ?point.coords(),
            from = from.get(),
            to = to.get(),
            weight,
            "weight transferred"
        );
        Ok(weight)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "index comes from the entry list, which insert caps at u32::MAX."
    )]
    fn id_at(&self, index: usize) -> ClusterId {
        ClusterId(index as u32)
    }

    fn entry(&self, id: ClusterId) -> Result<&TaggedCluster> {
        self.entries.get(id.index()).ok_or(unknown_cluster())
    }

    fn get_mut(&mut self, id: ClusterId) -> Result<&mut Cluster> {
        self.entries
            .get_mut(id.index())
            .map(|e| &mut e.cluster)
            .ok_or(unknown_cluster())
    }

    fn pair_mut(&mut self, a: ClusterId, b: ClusterId) -> Result<(&mut Cluster, &mut Cluster)> {
        let (i, j) = (a.index(), b.index());
        if i == j || i >= self.entries.len() || j >= self.entries.len() {
            return Err(unknown_cluster());
        }
        if i < j {
            let (lo, hi) = self.entries.split_at_mut(j);
            Ok((&mut lo[i].cluster, &mut hi[0].cluster))
        } else {
            let (lo, hi) = self.entries.split_at_mut(i);
            Ok((&mut hi[0].cluster, &mut lo[j].cluster))
        }
    }
}

const fn unknown_cluster() -> Error {
    Error::InvalidArgument {
        name: "cluster",
        message: "unknown cluster id",
    }
}
