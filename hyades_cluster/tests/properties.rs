// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for points, clusters, and the classifier.

use hyades_cluster::{Cluster, Point, classify};
use proptest::prelude::*;

fn coords(dim: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3f64..1.0e3, dim)
}

fn approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| {
        let scale = x.abs().max(y.abs()).max(1.0);
        (x - y).abs() <= 1e-9 * scale
    })
}

proptest! {
    #[test]
    fn prop_self_distance_is_zero(c in (1usize..6).prop_flat_map(coords)) {
        let p = Point::new(c.clone()).unwrap();
        prop_assert_eq!(p.distance_to(&c).unwrap(), 0.0);
    }

    #[test]
    fn prop_centroid_tracks_aggregate(
        seed in coords(2),
        adds in prop::collection::vec((coords(2), 1u32..5), 0..20),
    ) {
        let mut c = Cluster::from_coords(seed).unwrap();
        for (p, w) in &adds {
            c.add(p, f64::from(*w)).unwrap();
            let expected: Vec<f64> = c.aggregate().iter().map(|a| a / c.members()).collect();
            prop_assert!(approx_eq(c.centroid().coords(), &expected));
        }
        let total: f64 = c.frequencies().map(|(_, w)| w).sum();
        prop_assert!((total - c.members()).abs() < 1e-9);
    }

    #[test]
    fn prop_add_then_remove_restores(
        seed in coords(3),
        p in coords(3),
        w in 1u32..10,
    ) {
        let mut c = Cluster::from_coords(seed).unwrap();
        let before = c.centroid().clone();
        let freq = c.frequency_at(&p);
        c.add(&p, f64::from(w)).unwrap();
        c.remove(&p, f64::from(w)).unwrap();
        prop_assert!(approx_eq(c.centroid().coords(), before.coords()));
        prop_assert_eq!(c.frequency_at(&p), freq);
    }

    #[test]
    fn prop_classify_len_and_order(
        centroids in prop::collection::vec(coords(2), 1..12),
        p in coords(2),
        k in 1.0f64..20.0,
    ) {
        let clusters: Vec<Point> = centroids.into_iter().map(|c| Point::new(c).unwrap()).collect();
        let ranked = classify(&p, &clusters, k).unwrap();
        prop_assert_eq!(ranked.len(), (k.round() as usize).min(clusters.len()));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
            if pair[0].distance == pair[1].distance {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
        let mut seen: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), ranked.len());
        for r in &ranked {
            prop_assert!(core::ptr::eq(r.cluster, &clusters[r.index]));
        }
    }
}

#[test]
fn weighted_mean_scenario() {
    let mut c = Cluster::from_coords([0.0, 0.0]).unwrap();
    c.add(&[2.0, 0.0], 1.0).unwrap();
    assert!(approx_eq(c.centroid().coords(), &[1.0, 0.0]));
    c.add(&[0.0, 2.0], 1.0).unwrap();
    assert!(approx_eq(c.centroid().coords(), &[2.0 / 3.0, 2.0 / 3.0]));
}
