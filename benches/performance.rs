// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshlines::{
    smooth_mesh_lines, smooth_range, unique, Axis, DedupTolerance, RectGrid, SmoothingConfig,
};

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let config = SmoothingConfig::new(1.0);

    group.bench_function("uniform", |b| {
        b.iter(|| smooth_range(black_box(0.0), black_box(100.0), 1.0, 1.0, &config).unwrap());
    });

    group.bench_function("taper_start", |b| {
        b.iter(|| smooth_range(black_box(0.0), black_box(100.0), 1e-3, 1.0, &config).unwrap());
    });

    group.bench_function("taper_both", |b| {
        b.iter(|| smooth_range(black_box(0.0), black_box(100.0), 1e-3, 1e-2, &config).unwrap());
    });

    group.finish();
}

fn bench_smooth(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth");
    let config = SmoothingConfig::new(5.0);

    let patch = vec![-50.0, 0.0, 0.381, 0.762, 1.143, 1.524, 100.0];
    group.bench_with_input(BenchmarkId::new("patch", patch.len()), &patch, |b, lines| {
        b.iter(|| smooth_mesh_lines(black_box(lines), &config).unwrap());
    });

    let symmetric = vec![-100.0, -90.0, -0.5, 0.5, 90.0, 100.0];
    for exploit in [true, false] {
        let config = config.clone().with_symmetry(exploit);
        group.bench_with_input(
            BenchmarkId::new("symmetric", exploit),
            &symmetric,
            |b, lines| {
                b.iter(|| smooth_mesh_lines(black_box(lines), &config).unwrap());
            },
        );
    }

    // many fine features spread over a coarse domain
    let features: Vec<f64> = (0..50)
        .flat_map(|i| {
            let x = i as f64 * 37.0;
            [x, x + 0.1]
        })
        .collect();
    group.bench_with_input(
        BenchmarkId::new("features", features.len()),
        &features,
        |b, lines| {
            b.iter(|| smooth_mesh_lines(black_box(lines), &config).unwrap());
        },
    );

    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let lines: Vec<f64> = (0..10_000).map(|i| ((i * 7919) % 10_000) as f64 * 1e-3).collect();
    c.bench_function("dedup_10k", |b| {
        b.iter(|| unique(black_box(&lines), DedupTolerance::default()));
    });
}

fn bench_grid(c: &mut Criterion) {
    let mut grid = RectGrid::new();
    for axis in Axis::ALL {
        grid.set_lines(axis, &[-200.0, -10.0, -9.9, 0.0, 9.9, 10.0, 200.0]);
    }
    let config = SmoothingConfig::new(2.0);

    c.bench_function("grid_smooth_all", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            grid.smooth_all(black_box(&config)).unwrap()
        });
    });
}

criterion_group!(benches, bench_range, bench_smooth, bench_dedup, bench_grid);
criterion_main!(benches);
