//! Solver benchmarks over seeded random grid graphs.
//!
//! Run with `cargo bench --package navgraph`.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use navgraph::NavGraph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 4-connected `side` x `side` grid with jittered positions and a sprinkle of
/// weighted points.
fn grid_graph(side: i64, seed: u64) -> NavGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = NavGraph::new();

    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            let jitter: f32 = rng.gen_range(-0.2..0.2);
            let weight = if rng.gen_bool(0.05) { 4.0 } else { 1.0 };
            graph
                .add_point(
                    id,
                    Vec3::new(x as f32 + jitter, y as f32 - jitter, 0.0),
                    weight,
                    0,
                )
                .unwrap();
        }
    }
    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            if x + 1 < side {
                graph.connect_points(id, id + 1, true).unwrap();
            }
            if y + 1 < side {
                graph.connect_points(id, id + side, true).unwrap();
            }
        }
    }
    graph
}

/// The grid above, partitioned into `side / block` rows of octants with
/// 4-connected octant adjacency.
fn grid_graph_with_octants(side: i64, block: i64, seed: u64) -> NavGraph {
    let mut graph = grid_graph(side, seed);
    let blocks = side / block;

    for by in 0..blocks {
        for bx in 0..blocks {
            let octant_id = by * blocks + bx;
            let mut members = Vec::with_capacity((block * block) as usize);
            for y in (by * block)..((by + 1) * block) {
                for x in (bx * block)..((bx + 1) * block) {
                    members.push(y * side + x);
                }
            }
            let center = members[0];
            let pos = Vec3::new(
                (bx * block) as f32 + block as f32 / 2.0,
                (by * block) as f32 + block as f32 / 2.0,
                0.0,
            );
            graph.add_octant(octant_id, &members, pos, center).unwrap();
        }
    }
    for by in 0..blocks {
        for bx in 0..blocks {
            let octant_id = by * blocks + bx;
            if bx + 1 < blocks {
                graph.connect_octants(octant_id, octant_id + 1, true).unwrap();
            }
            if by + 1 < blocks {
                graph
                    .connect_octants(octant_id, octant_id + blocks, true)
                    .unwrap();
            }
        }
    }
    graph
}

fn bench_flat_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_solve");
    for side in [16i64, 32, 64] {
        let mut graph = grid_graph(side, 7);
        let goal = side * side - 1;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}x{side}")),
            &side,
            |b, _| {
                b.iter(|| {
                    let path = graph.get_id_path(0, goal, 0, false).unwrap();
                    black_box(path)
                })
            },
        );
    }
    group.finish();
}

fn bench_octant_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("octant_solve");
    for side in [16i64, 32, 64] {
        let mut graph = grid_graph_with_octants(side, 8, 7);
        let goal = side * side - 1;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}x{side}")),
            &side,
            |b, _| {
                b.iter(|| {
                    let path = graph.get_id_path(0, goal, 0, true).unwrap();
                    black_box(path)
                })
            },
        );
    }
    group.finish();
}

fn bench_closest_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_point");
    let graph = grid_graph(64, 7);
    group.bench_function("64x64", |b| {
        b.iter(|| black_box(graph.get_closest_point(Vec3::new(31.3, 17.9, 0.5), false, 0)))
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5));
    targets = bench_flat_solve, bench_octant_solve, bench_closest_point
);
criterion_main!(benches);
