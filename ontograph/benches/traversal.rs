//! Benchmarks for graph construction and hierarchy traversal
//!
//! Run with: cargo bench -p ontograph

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ontograph::graph::{memory, CsrOntologyGraph, OntologyGraph, OntologyGraphBuilder};
use ontograph::{Edge, RelationType};
use rand::prelude::*;

type Graph<S> = CsrOntologyGraph<u32, RelationType, S>;

// ============================================================================
// Helpers for synthetic ontology generation
// ============================================================================

fn is_a(child: u32, parent: u32) -> Edge<u32, RelationType> {
    Edge::new(child, parent, RelationType::IsA)
}

/// Generate a linear chain: n-1 is_a n-2 is_a ... is_a 0
fn generate_linear_chain(n: u32) -> Vec<Edge<u32, RelationType>> {
    (1..n).map(|i| is_a(i, i - 1)).collect()
}

/// Generate a wide ontology: [1, 2, ..., n-1] is_a 0
fn generate_wide_graph(n: u32) -> Vec<Edge<u32, RelationType>> {
    (1..n).map(|i| is_a(i, 0)).collect()
}

/// Generate a binary tree of depth d (2^(d+1) - 1 nodes), heap numbered
fn generate_binary_tree(depth: u32) -> Vec<Edge<u32, RelationType>> {
    let nodes = (1u32 << (depth + 1)) - 1;
    (1..nodes).map(|i| is_a(i, (i - 1) / 2)).collect()
}

/// Generate a random DAG rooted at 0 with `extra` additional is_a edges and
/// `part_of` part_of edges layered on top.
fn generate_random_dag(n: u32, extra: u32, part_of: u32, seed: u64) -> Vec<Edge<u32, RelationType>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity((n + extra + part_of) as usize);

    // Spine keeps every node reachable from 0
    for i in 1..n {
        edges.push(is_a(i, rng.gen_range(0..i)));
    }

    for _ in 0..extra {
        let child = rng.gen_range(1..n);
        edges.push(is_a(child, rng.gen_range(0..child)));
    }

    for _ in 0..part_of {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        edges.push(Edge::new(a, b, RelationType::PartOf));
    }

    edges
}

fn build<S: ontograph::DataIndexer>(edges: &[Edge<u32, RelationType>]) -> Graph<S> {
    OntologyGraphBuilder::default()
        .build::<u32, S>(edges)
        .expect("synthetic ontology builds")
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_random_dag");

    for nodes in [1_000, 10_000, 50_000] {
        let edges = generate_random_dag(nodes, nodes, nodes / 2, 42);

        group.throughput(Throughput::Elements(edges.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &edges, |b, edges| {
            b.iter(|| black_box(build::<u8>(edges).len()));
        });
    }

    group.finish();
}

fn bench_build_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_widths");
    let edges = generate_random_dag(10_000, 10_000, 5_000, 42);

    group.bench_function("u8", |b| b.iter(|| black_box(build::<u8>(&edges).len())));
    group.bench_function("u16", |b| b.iter(|| black_box(build::<u16>(&edges).len())));
    group.bench_function("u32", |b| b.iter(|| black_box(build::<u32>(&edges).len())));
    group.bench_function("u64", |b| b.iter(|| black_box(build::<u64>(&edges).len())));

    group.finish();
}

fn bench_ancestors_linear_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("ancestors_linear_chain");

    for size in [100, 1_000, 10_000] {
        let graph = build::<u8>(&generate_linear_chain(size));
        let leaf = size - 1;

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaf, |b, leaf| {
            b.iter(|| black_box(graph.ancestors(leaf, true).unwrap().count()));
        });
    }

    group.finish();
}

fn bench_descendants_wide_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("descendants_wide_graph");

    for size in [100, 1_000, 10_000] {
        let graph = build::<u8>(&generate_wide_graph(size));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(graph.descendants(&0, false).unwrap().count()));
        });
    }

    group.finish();
}

fn bench_descendants_binary_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("descendants_binary_tree");

    // depth 6 = 127 nodes, depth 10 = 2047 nodes, depth 14 = 32767 nodes
    for depth in [6, 10, 14] {
        let graph = build::<u8>(&generate_binary_tree(depth));
        let node_count = (1u64 << (depth + 1)) - 1;

        group.throughput(Throughput::Elements(node_count));
        group.bench_with_input(BenchmarkId::from_parameter(node_count), &depth, |b, _| {
            b.iter(|| black_box(graph.descendants(&0, true).unwrap().count()));
        });
    }

    group.finish();
}

fn bench_random_dag_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_dag_queries");

    let nodes = 10_000;
    let graph = build::<u8>(&generate_random_dag(nodes, nodes * 2, nodes, 42));
    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<u32> = (0..100).map(|_| rng.gen_range(0..nodes)).collect();

    group.bench_function("parents", |b| {
        b.iter(|| {
            samples
                .iter()
                .map(|p| graph.parents(p, false).unwrap().count())
                .sum::<usize>()
        });
    });

    group.bench_function("ancestors", |b| {
        b.iter(|| {
            samples
                .iter()
                .map(|p| graph.ancestors(p, false).unwrap().count())
                .sum::<usize>()
        });
    });

    // Concrete iterator avoids the boxed facade
    group.bench_function("ancestors_unboxed", |b| {
        b.iter(|| {
            samples
                .iter()
                .map(|p| graph.ancestors_iter(p, false).unwrap().count())
                .sum::<usize>()
        });
    });

    group.bench_function("is_ancestor_of", |b| {
        b.iter(|| {
            samples
                .iter()
                .filter(|p| graph.is_ancestor_of(&0, p).unwrap())
                .count()
        });
    });

    group.finish();
}

fn bench_repair_multiple_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair_multiple_roots");

    // Ten disjoint trees; the builder adds a synthetic root above them
    let edges: Vec<_> = (0..10u32)
        .flat_map(|tree| {
            let base = tree * 1_000;
            (1..1_000).map(move |i| is_a(base + i, base + (i - 1) / 2))
        })
        .collect();

    group.bench_function("ten_trees_10k_nodes", |b| {
        b.iter(|| black_box(build::<u8>(&edges).len()));
    });

    group.finish();
}

// ============================================================================
// Memory size benchmarks (not timing benchmarks - just measurements)
// ============================================================================

/// Print memory usage statistics for various graph sizes
fn bench_memory_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_sizes");

    println!("\n");
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                         MEMORY SIZE MEASUREMENTS                             ║");
    println!("╠══════════════════════════════════════════════════════════════════════════════╣");
    println!("║                                                                              ║");
    println!("║  CsrOntologyGraph<u32, RelationType, u8>                                     ║");
    println!("║  ───────────────────────────────────────                                     ║");
    println!(
        "║  {:>8} {:>12} {:>12} {:>12} {:>12}                   ║",
        "Nodes", "Cells", "Total", "Per Node", "Data"
    );

    for nodes in [1_000, 10_000, 100_000] {
        let graph = build::<u8>(&generate_random_dag(nodes, nodes * 2, nodes, 42));
        let mem = memory::graph_size(&graph);

        println!(
            "║  {:>8} {:>12} {:>12} {:>12} {:>12}                   ║",
            graph.len(),
            graph.matrix().nnz(),
            memory::format_bytes(mem.total_bytes),
            format!("{:.1} B", memory::bytes_per_node(&graph)),
            memory::format_bytes(mem.data_bytes)
        );
    }

    println!("║                                                                              ║");
    println!("║  Cell width at 10k nodes                                                     ║");
    println!("║  ───────────────────────                                                     ║");
    println!(
        "║  {:>8} {:>12} {:>12}                                              ║",
        "Width", "Total", "Data"
    );

    let edges = generate_random_dag(10_000, 20_000, 10_000, 42);
    let rows = [
        ("u8", memory::graph_size(&build::<u8>(&edges))),
        ("u16", memory::graph_size(&build::<u16>(&edges))),
        ("u32", memory::graph_size(&build::<u32>(&edges))),
        ("u64", memory::graph_size(&build::<u64>(&edges))),
    ];
    for (width, mem) in rows {
        println!(
            "║  {:>8} {:>12} {:>12}                                              ║",
            width,
            memory::format_bytes(mem.total_bytes),
            memory::format_bytes(mem.data_bytes)
        );
    }

    println!("║                                                                              ║");
    println!("╚══════════════════════════════════════════════════════════════════════════════╝");
    println!();

    // Run a trivial benchmark so criterion doesn't complain
    let graph = build::<u8>(&generate_linear_chain(100));
    group.bench_function("memory_measurement_overhead", |b| {
        b.iter(|| black_box(memory::graph_size(&graph)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_build_widths,
    bench_ancestors_linear_chain,
    bench_descendants_wide_graph,
    bench_descendants_binary_tree,
    bench_random_dag_queries,
    bench_repair_multiple_roots,
    bench_memory_sizes,
);

criterion_main!(benches);
