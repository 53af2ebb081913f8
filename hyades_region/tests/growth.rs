// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end growth scenarios and properties.

use hyades_cluster::{Point, classify};
use hyades_region::{Cell, ClusterId, Engine, GrowthConfig, RegionMap, Tag};
use proptest::prelude::*;

const RED: Tag = Tag::from_rgb(255, 0, 0);
const BLUE: Tag = Tag::from_rgb(0, 0, 255);

fn pt(x: f64, y: f64) -> Point {
    Point::new([x, y]).unwrap()
}

fn close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
}

fn render(map: &RegionMap) -> String {
    let size = map.size();
    let mut out = String::new();
    for row in 0..size.height {
        for col in 0..size.width {
            out.push(match map.get(Cell::new(col, row)) {
                Some(RED) => 'A',
                Some(BLUE) => 'B',
                Some(Tag::BORDER) => '#',
                _ => '.',
            });
        }
        out.push('\n');
    }
    out
}

#[test]
fn two_seeds_split_the_grid_on_the_anti_diagonal() {
    let mut engine = Engine::new(5, 5, GrowthConfig::unbounded()).unwrap();
    engine.add_cluster(pt(0.0, 0.0), RED).unwrap();
    engine.add_cluster(pt(4.0, 4.0), BLUE).unwrap();
    let mut map = RegionMap::new(5, 5);
    let (steps, _) = engine.run_until_exhausted(&mut map, 100).unwrap();
    assert!(steps <= 6, "took {steps} steps");
    assert_eq!(map.claimed(), 25);
    assert_eq!(
        render(&map),
        "AAAAA\n\
         AAAAB\n\
         AAABB\n\
         AABBB\n\
         ABBBB\n"
    );
}

#[test]
fn strictly_closer_centroid_takes_the_middle() {
    let mut engine = Engine::new(5, 5, GrowthConfig::unbounded()).unwrap();
    engine.add_cluster(pt(0.0, 0.0), RED).unwrap();
    let b = engine.add_cluster(pt(4.0, 4.0), BLUE).unwrap();
    engine.add_point(b, &[3.0, 3.0], 1.0).unwrap();
    assert!(close(
        engine.clusters().get(b).unwrap().centroid().coords(),
        &[3.5, 3.5]
    ));
    let mut map = RegionMap::new(5, 5);
    engine.run_until_exhausted(&mut map, 100).unwrap();
    assert_eq!(map.claimed(), 25);
    assert_eq!(map.get(Cell::new(2, 2)), Some(BLUE));
    for row in 0..5 {
        for col in 0..5 {
            let cell = Cell::new(col, row);
            let owner = engine.clusters().nearest(&cell.coords()).unwrap();
            assert_eq!(map.get(cell), engine.clusters().tag(owner), "{cell:?}");
        }
    }
}

#[test]
fn contested_cell_carries_its_weight_to_the_winner() {
    let mut engine = Engine::new(5, 1, GrowthConfig::unbounded()).unwrap();
    let a = engine.add_cluster(pt(0.0, 0.0), RED).unwrap();
    engine.add_point(a, &[3.0, 0.0], 1.0).unwrap();
    let b = engine.add_cluster(pt(4.0, 0.0), BLUE).unwrap();
    let mut map = RegionMap::new(5, 1);

    let report = engine.step(&mut map).unwrap();
    let moved: Vec<_> = report
        .reassigned
        .iter()
        .filter(|r| r.weight > 0.0)
        .collect();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].cell, Cell::new(3, 0));
    assert_eq!((moved[0].from, moved[0].to), (a, b));
    assert_eq!(moved[0].weight, 1.0);

    let ca = engine.clusters().get(a).unwrap();
    let cb = engine.clusters().get(b).unwrap();
    assert!(close(ca.centroid().coords(), &[0.0, 0.0]));
    assert_eq!(ca.members(), 1.0);
    assert!(close(cb.centroid().coords(), &[3.5, 0.0]));
    assert_eq!(cb.members(), 2.0);

    engine.run_until_exhausted(&mut map, 100).unwrap();
    assert_eq!(render(&map), "AABBB\n");
}

#[test]
fn frontier_growth_into_a_borrowed_buffer() {
    let mut pixels = vec![0_u32; 12];
    let mut engine = Engine::new(4, 3, GrowthConfig::default()).unwrap();
    engine.add_cluster(pt(1.0, 1.0), RED).unwrap();
    {
        let mut map = RegionMap::from_buffer(4, 3, pixels.as_mut_slice()).unwrap();
        engine.run_until_exhausted(&mut map, 100).unwrap();
    }
    assert!(pixels.iter().all(|&p| p == RED.get()));
}

#[test]
fn border_queue_leaves_no_cell_unvisited() {
    let mut engine = Engine::with_border_queue(5, 5, GrowthConfig::unbounded()).unwrap();
    engine.add_cluster(pt(0.0, 0.0), RED).unwrap();
    engine.add_cluster(pt(4.0, 4.0), BLUE).unwrap();
    let mut map = RegionMap::new(5, 5);
    let (steps, report) = engine.run_until_exhausted(&mut map, 10).unwrap();
    assert_eq!(steps, 10);
    assert!(!engine.is_exhausted());
    assert_eq!(map.count(Tag::UNCLAIMED), 0);
    assert!(!report.bordered.is_empty());
    assert!(map.count(Tag::BORDER) > 0);
    assert_eq!(map.get(Cell::new(0, 0)), Some(RED));
    assert_eq!(map.get(Cell::new(4, 4)), Some(BLUE));
}

proptest! {
    #[test]
    fn prop_single_cluster_grows_monotonically(
        width in 1u32..12,
        height in 1u32..12,
        seed in (0u32..12, 0u32..12),
        batch in 1usize..20,
    ) {
        let (col, row) = (seed.0 % width, seed.1 % height);
        let config = GrowthConfig::default().with_batch_size(batch);
        let mut engine = Engine::new(width, height, config).unwrap();
        let id = engine
            .add_cluster(pt(f64::from(col), f64::from(row)), RED)
            .unwrap();
        let mut map = RegionMap::new(width, height);
        let area = map.size().area();
        let mut claimed = 0;
        let mut steps = 0;
        while !engine.is_exhausted() {
            let before = map.clone();
            let report = engine.step(&mut map).unwrap();
            prop_assert!(report.reassigned.is_empty());
            for &(cell, owner) in &report.claimed {
                prop_assert_eq!(owner, id);
                prop_assert_eq!(before.get(cell), Some(Tag::UNCLAIMED));
            }
            prop_assert!(map.claimed() >= claimed);
            claimed = map.claimed();
            steps += 1;
            prop_assert!(steps <= area + 1);
        }
        prop_assert_eq!(map.count(RED), area);
    }

    #[test]
    fn prop_contested_cells_go_to_the_nearer_cluster(
        width in 1u32..10,
        height in 1u32..10,
        a in (0u32..10, 0u32..10),
        b in (0u32..10, 0u32..10),
        batch in prop_oneof![Just(usize::MAX), 1usize..8],
    ) {
        let a = Cell::new(a.0 % width, a.1 % height);
        let b = Cell::new(b.0 % width, b.1 % height);
        prop_assume!(a != b);
        let config = GrowthConfig::default().with_batch_size(batch);
        let mut engine = Engine::new(width, height, config).unwrap();
        let ids: [ClusterId; 2] = [
            engine.add_cluster(Point::new(a.coords()).unwrap(), RED).unwrap(),
            engine.add_cluster(Point::new(b.coords()).unwrap(), BLUE).unwrap(),
        ];
        let mut map = RegionMap::new(width, height);
        engine.run_until_exhausted(&mut map, 10_000).unwrap();
        prop_assert!(engine.is_exhausted());

        let pair = [
            engine.clusters().get(ids[0]).unwrap(),
            engine.clusters().get(ids[1]).unwrap(),
        ];
        for row in 0..height {
            for col in 0..width {
                let cell = Cell::new(col, row);
                let winner = classify(&cell.coords(), &pair, 1.0).unwrap()[0].index;
                let tag = if winner == 0 { RED } else { BLUE };
                prop_assert_eq!(map.get(cell), Some(tag));
            }
        }
    }
}
