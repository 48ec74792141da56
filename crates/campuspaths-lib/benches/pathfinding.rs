use campuspaths_lib::{dijkstra, CampusMap, DirectedGraph, Edge};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

static CAMPUS: Lazy<CampusMap> = Lazy::new(|| CampusMap::load(&fixture_dir()).expect("fixture loads"));

/// Square grid with bidirectional unit edges, `side * side` nodes.
static GRID: Lazy<DirectedGraph<(u32, u32), OrderedFloat<f64>>> = Lazy::new(|| grid(60));

fn grid(side: u32) -> DirectedGraph<(u32, u32), OrderedFloat<f64>> {
    let mut graph = DirectedGraph::new();
    for x in 0..side {
        for y in 0..side {
            graph.add_node((x, y)).expect("fresh node");
        }
    }
    for x in 0..side {
        for y in 0..side {
            let mut link = |to: (u32, u32)| {
                let weight = OrderedFloat(1.0 + f64::from((x * 7 + y * 3) % 5));
                graph
                    .add_edge(&(x, y), Edge::new(to, weight))
                    .expect("valid edge");
            };
            if x + 1 < side {
                link((x + 1, y));
            }
            if y + 1 < side {
                link((x, y + 1));
            }
            if x > 0 {
                link((x - 1, y));
            }
            if y > 0 {
                link((x, y - 1));
            }
        }
    }
    graph
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let campus = &*CAMPUS;

    c.bench_function("campus_mgh_cse", |b| {
        b.iter(|| {
            let path = campus
                .find_shortest_path("MGH", "CSE")
                .expect("known buildings")
                .expect("route exists");
            black_box(path.cost())
        });
    });

    let graph = &*GRID;
    c.bench_function("grid_corner_to_corner", |b| {
        b.iter(|| {
            let path = dijkstra(graph, &(0, 0), &(59, 59)).expect("route exists");
            black_box(path.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
