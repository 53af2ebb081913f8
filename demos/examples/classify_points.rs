// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster statistics and nearest-centroid classification.
//!
//! Run:
//! - `cargo run -p hyades_demos --example classify_points`

use hyades_cluster::{Cluster, Error, classify};
use kurbo::Point;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .init();

    let mut a = Cluster::from_coords([0.0, 0.0])?;
    a.add(&[2.0, 0.0], 1.0)?;
    println!("A centroid after one add: {:?}", a.centroid().coords());
    a.add(&[0.0, 2.0], 1.0)?;
    println!("A centroid after two adds: {:?}", a.centroid().coords());

    let mut b = Cluster::from_coords([6.0, 6.0])?;
    b.add(&[5.0, 5.0], 3.0)?;
    println!(
        "B: {} members over {} locations, centroid {:?}",
        b.members(),
        b.distinct_points(),
        b.centroid().coords()
    );

    // Removing more than B holds at a location is refused.
    match b.remove(&[5.0, 5.0], 4.0) {
        Err(err) => println!("refused: {err}"),
        Ok(_) => unreachable!("B only holds 3 at (5, 5)"),
    }

    let clusters = [a, b];
    for q in [Point::new(1.0, 1.0), Point::new(3.0, 3.0), Point::new(9.0, 2.0)] {
        let ranked = classify(&[q.x, q.y], &clusters, 2.0)?;
        let summary: Vec<String> = ranked
            .iter()
            .map(|r| format!("#{} at {:.3}", r.index, r.distance))
            .collect();
        println!("{q:?} -> {}", summary.join(", "));
    }
    Ok(())
}
