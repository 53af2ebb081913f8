// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hyades_cluster::{Cluster, Point, classify};
use hyades_region::{Engine, GrowthConfig, RegionMap, Tag};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_seeds(n: usize, size: u32, seed: u64) -> Vec<(Point, Tag)> {
    let mut rng = Rng::new(seed);
    let extent = f64::from(size - 1);
    (0..n)
        .map(|i| {
            let x = (rng.next_f64() * extent).round();
            let y = (rng.next_f64() * extent).round();
            let tag = Tag::from_rgb(i as u8, (i >> 8) as u8, 0x80);
            (Point::new([x, y]).unwrap(), tag)
        })
        .collect()
}

fn bench_frontier(c: &mut Criterion) {
    let mut group = c.benchmark_group("frontier");
    for &size in &[64_u32, 128, 256] {
        let seeds = gen_seeds(8, size, 0x5eed);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_function(format!("fill_unbounded_{size}"), |b| {
            b.iter_batched(
                || {
                    let mut engine = Engine::new(size, size, GrowthConfig::unbounded()).unwrap();
                    for (p, tag) in &seeds {
                        engine.add_cluster(p.clone(), *tag).unwrap();
                    }
                    (engine, RegionMap::new(size, size))
                },
                |(mut engine, mut map)| {
                    let (steps, _) = engine.run_until_exhausted(&mut map, usize::MAX).unwrap();
                    black_box(steps);
                },
                BatchSize::LargeInput,
            );
        });
    }
    let seeds = gen_seeds(8, 128, 0xbeef);
    group.bench_function("fill_batched_128", |b| {
        b.iter_batched(
            || {
                let mut engine = Engine::new(128, 128, GrowthConfig::default()).unwrap();
                for (p, tag) in &seeds {
                    engine.add_cluster(p.clone(), *tag).unwrap();
                }
                (engine, RegionMap::new(128, 128))
            },
            |(mut engine, mut map)| {
                let (steps, _) = engine.run_until_exhausted(&mut map, usize::MAX).unwrap();
                black_box(steps);
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_border(c: &mut Criterion) {
    let mut group = c.benchmark_group("border");
    for &size in &[32_u32, 64] {
        let seeds = gen_seeds(4, size, 0xb0d3);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_function(format!("steps_{size}"), |b| {
            b.iter_batched(
                || {
                    let mut engine =
                        Engine::with_border_queue(size, size, GrowthConfig::unbounded()).unwrap();
                    for (p, tag) in &seeds {
                        engine.add_cluster(p.clone(), *tag).unwrap();
                    }
                    (engine, RegionMap::new(size, size))
                },
                |(mut engine, mut map)| {
                    // Boundaries never drain; bound by the grid diagonal.
                    let (steps, _) = engine
                        .run_until_exhausted(&mut map, 2 * size as usize)
                        .unwrap();
                    black_box(steps);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let mut rng = Rng::new(0xc1a5);
    for &n in &[8_usize, 64, 512] {
        let clusters: Vec<Cluster> = (0..n)
            .map(|_| {
                Cluster::from_coords([rng.next_f64() * 1000.0, rng.next_f64() * 1000.0]).unwrap()
            })
            .collect();
        let queries: Vec<[f64; 2]> = (0..256)
            .map(|_| [rng.next_f64() * 1000.0, rng.next_f64() * 1000.0])
            .collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("nearest_n{n}"), |b| {
            b.iter(|| {
                for q in &queries {
                    let r = classify(q, &clusters, 1.0).unwrap();
                    black_box(r[0].index);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frontier, bench_border, bench_classify);
criterion_main!(benches);
