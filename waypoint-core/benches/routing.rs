//! Benchmarks for routing and spanning-tree queries on a grid road network.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waypoint_core::{
    minimum_spanning_tree, shortest_path, shortest_paths_from_source, FactorRange, RouteGraph,
    StaticWeights, TrafficWeights,
};

/// `size x size` grid with bidirectional streets of varying length.
fn grid(size: usize) -> RouteGraph {
    let mut graph = RouteGraph::undirected();
    let id = |r: usize, c: usize| format!("{}:{}", r, c);
    for r in 0..size {
        for c in 0..size {
            let weight = 1.0 + ((r * 7 + c * 13) % 10) as f64;
            if c + 1 < size {
                graph.add_edge(&id(r, c), &id(r, c + 1), weight);
            }
            if r + 1 < size {
                graph.add_edge(&id(r, c), &id(r + 1, c), weight + 0.5);
            }
        }
    }
    graph
}

fn bench_all_destinations(c: &mut Criterion) {
    let graph = grid(50);
    c.bench_function("shortest_paths_from_source_50x50", |b| {
        b.iter(|| {
            shortest_paths_from_source(black_box(&graph), &mut StaticWeights, "0:0")
                .expect("source exists")
        })
    });
}

fn bench_single_pair_traffic(c: &mut Criterion) {
    let graph = grid(50);
    let mut traffic = TrafficWeights::seeded(FactorRange::default(), 42).expect("valid range");
    c.bench_function("shortest_path_traffic_50x50", |b| {
        b.iter(|| {
            shortest_path(black_box(&graph), &mut traffic, "0:0", "49:49").expect("nodes exist")
        })
    });
}

fn bench_spanning_tree(c: &mut Criterion) {
    let graph = grid(50);
    c.bench_function("minimum_spanning_tree_50x50", |b| {
        b.iter(|| minimum_spanning_tree(black_box(&graph), "0:0").expect("start exists"))
    });
}

criterion_group!(
    benches,
    bench_all_destinations,
    bench_single_pair_traffic,
    bench_spanning_tree
);
criterion_main!(benches);
