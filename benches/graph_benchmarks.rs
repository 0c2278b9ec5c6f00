use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use netopt::algo::{bfs, dfs, dijkstra, reverse_dijkstra, reverse_dijkstra_with_heap, ShortestPathConfig};
use netopt::graph::{props, Graph, NodeId};

/// Square grid with edges in both directions between orthogonal neighbours
fn grid(side: u64) -> Graph {
    let mut graph = Graph::with_capacity((side * side) as usize, (4 * side * side) as usize);
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            let length = (id % 7 + 1) as i64;
            if col + 1 < side {
                graph.add_edge(NodeId::new(id), NodeId::new(id + 1), props([("length", length)]));
                graph.add_edge(NodeId::new(id + 1), NodeId::new(id), props([("length", length)]));
            }
            if row + 1 < side {
                graph.add_edge(NodeId::new(id), NodeId::new(id + side), props([("length", length)]));
                graph.add_edge(NodeId::new(id + side), NodeId::new(id), props([("length", length)]));
            }
        }
    }
    graph
}

/// Benchmark edge insertion throughput
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for side in [10, 30, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side * side), side, |b, &side| {
            b.iter(|| criterion::black_box(grid(side)));
        });
    }
    group.finish();
}

/// Benchmark BFS and DFS over the whole grid
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for side in [30, 100].iter() {
        let graph = grid(*side);
        group.bench_with_input(BenchmarkId::new("bfs", side * side), &graph, |b, graph| {
            b.iter(|| criterion::black_box(bfs(graph, NodeId::new(0)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("dfs", side * side), &graph, |b, graph| {
            b.iter(|| criterion::black_box(dfs(graph, NodeId::new(0)).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark naive vs heap label-setting
fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths");
    group.sample_size(20);
    let config = ShortestPathConfig::default();

    for side in [10, 30].iter() {
        let graph = grid(*side);
        let target = NodeId::new(side * side - 1);
        group.bench_with_input(BenchmarkId::new("dijkstra", side * side), &graph, |b, graph| {
            b.iter(|| criterion::black_box(dijkstra(graph, NodeId::new(0), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("reverse_naive", side * side), &graph, |b, graph| {
            b.iter(|| criterion::black_box(reverse_dijkstra(graph, target, &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("reverse_heap", side * side), &graph, |b, graph| {
            b.iter(|| criterion::black_box(reverse_dijkstra_with_heap(graph, target, &config).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_edge_insertion, bench_traversal, bench_shortest_paths);
criterion_main!(benches);
