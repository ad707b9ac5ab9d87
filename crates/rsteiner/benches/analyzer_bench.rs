//! Criterion benchmarks for the hot path shared by every solver: grid
//! construction, adjacency matrix build, spanning check and cycle search.
//!
//! Sizes are terminal counts on a 0..12 lattice box.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::Rng;
use rsteiner::api::{
    draw_terminals, has_cycle, is_spanning_tree, AdjacencyMatrix, GridGraph, ReplayToken,
    TerminalCfg, TerminalCount,
};

fn grid(n: usize, seed: u64) -> (GridGraph, Vec<rsteiner::api::Point>) {
    let cfg = TerminalCfg {
        count: TerminalCount::Fixed(n),
        x_range: (0.0, 12.0),
        y_range: (0.0, 12.0),
        lattice: true,
    };
    let pts = draw_terminals(cfg, ReplayToken { seed, index: 0 });
    let grid = GridGraph::build(&pts).unwrap();
    (grid, pts)
}

fn random_selection(len: usize, seed: u64) -> Vec<bool> {
    let mut rng = ReplayToken { seed, index: 1 }.to_std_rng();
    (0..len).map(|_| rng.gen_bool(0.4)).collect()
}

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");
    for &n in &[4usize, 8, 12] {
        group.bench_with_input(BenchmarkId::new("grid_build", n), &n, |b, &n| {
            let (_, pts) = grid(n, 21);
            b.iter(|| GridGraph::build(&pts))
        });

        group.bench_with_input(BenchmarkId::new("is_spanning_tree", n), &n, |b, &n| {
            let (g, pts) = grid(n, 22);
            b.iter_batched(
                || random_selection(g.edge_count(), 23),
                |sel| is_spanning_tree(&sel, &g.edges, &pts),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("has_cycle", n), &n, |b, &n| {
            let (g, _) = grid(n, 24);
            let sel = random_selection(g.edge_count(), 25);
            let m = AdjacencyMatrix::from_selection(&sel, &g.edges);
            b.iter(|| has_cycle(m.matrix()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyzer);
criterion_main!(benches);
