// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region growth, rendered as ASCII.
//!
//! Seed three clusters, grow them step by step with the frontier strategy, and
//! assign a heavy point partway through. Each step prints a summary line and the
//! final map is drawn. Then run the border-queue strategy on the same seeds.
//!
//! Run:
//! - `cargo run -p hyades_demos --example grow_regions`
//!
//! Per-step `debug` events from the engine are printed alongside the maps.

use hyades_cluster::Point;
use hyades_region::{Cell, Engine, GrowthConfig, GrowthStrategy, RegionMap, Result, Tag};

const WIDTH: u32 = 24;
const HEIGHT: u32 = 12;

const TAGS: [(Tag, char); 3] = [
    (Tag::from_rgb(230, 60, 60), 'r'),
    (Tag::from_rgb(60, 180, 75), 'g'),
    (Tag::from_rgb(60, 90, 230), 'b'),
];

fn glyph(tag: Option<Tag>) -> char {
    match tag {
        Some(Tag::BORDER) => '#',
        Some(t) if t.is_unclaimed() => '.',
        Some(t) => TAGS
            .iter()
            .find(|(tag, _)| *tag == t)
            .map_or('?', |(_, c)| *c),
        None => ' ',
    }
}

fn print_map(map: &RegionMap) {
    for row in 0..HEIGHT {
        let line: String = (0..WIDTH)
            .map(|col| glyph(map.get(Cell::new(col, row))))
            .collect();
        println!("  {line}");
    }
}

fn seed<S: GrowthStrategy>(engine: &mut Engine<S>) -> Result<()> {
    let seeds = [[2.0, 2.0], [20.0, 3.0], [10.0, 10.0]];
    for (coords, (tag, _)) in seeds.iter().zip(TAGS) {
        engine.add_cluster(Point::new(*coords)?, tag)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let config = GrowthConfig::default().with_batch_size(12);
    let mut engine = Engine::new(WIDTH, HEIGHT, config)?;
    seed(&mut engine)?;
    let mut map = RegionMap::new(WIDTH, HEIGHT);

    let mut step = 0;
    while !engine.is_exhausted() {
        let report = engine.step(&mut map)?;
        step += 1;
        println!(
            "step {step}: {} claimed, {} reassigned, dirty {:?}",
            report.claimed.len(),
            report.reassigned.len(),
            report.bounds()
        );
        if step == 4 {
            // A heavy point pulls the green centroid toward the middle.
            let (id, change) = engine.assign(&[14.0, 6.0], 6.0)?;
            println!("assigned weight to cluster {} -> {} members", id.get(), change.members);
        }
    }
    println!("frontier growth finished after {step} steps");
    print_map(&map);

    let mut engine = Engine::with_border_queue(WIDTH, HEIGHT, GrowthConfig::unbounded())?;
    seed(&mut engine)?;
    let mut map = RegionMap::new(WIDTH, HEIGHT);
    let (steps, report) = engine.run_until_exhausted(&mut map, 40)?;
    println!(
        "border queue after {steps} steps: {} cells painted, {} on a border",
        map.claimed() - map.count(Tag::BORDER),
        map.count(Tag::BORDER)
    );
    println!("dirty area: {:?}", report.bounds());
    print_map(&map);
    Ok(())
}
