//! Benchmarks for cost operator construction and QAOA evaluation
//!
//! Compares:
//! - Sparse Pauli vs dense diagonal construction
//! - One QAOA expectation + gradient evaluation at increasing size

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maxcut_core::{build_cost_operator, Encoding, Graph, QaoaAnsatz};

fn bench_operator_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("operator_build");

    for num_nodes in [8, 12, 16].iter() {
        let graph = Graph::complete(*num_nodes);

        for encoding in [Encoding::Sparse, Encoding::Dense] {
            group.bench_with_input(
                BenchmarkId::new(encoding.name(), num_nodes),
                &graph,
                |b, g| b.iter(|| black_box(build_cost_operator(g, encoding).unwrap())),
            );
        }
    }

    group.finish();
}

fn bench_minimization_diagonal(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimization_diagonal");

    for num_nodes in [8, 12, 16].iter() {
        let graph = Graph::ring_with_chord(*num_nodes);
        let op = build_cost_operator(&graph, Encoding::Sparse).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(num_nodes), &op, |b, op| {
            b.iter(|| black_box(op.minimization_diagonal()))
        });
    }

    group.finish();
}

fn bench_qaoa_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qaoa_evaluation");

    for num_nodes in [4, 8, 12].iter() {
        let graph = Graph::ring_with_chord(*num_nodes);
        let op = build_cost_operator(&graph, Encoding::Sparse).unwrap();
        let ansatz = QaoaAnsatz::new(&op, 2);
        let params = ansatz.initial_params(42);

        group.bench_with_input(
            BenchmarkId::new("expectation", num_nodes),
            &params,
            |b, p| b.iter(|| black_box(ansatz.expectation(p))),
        );
        group.bench_with_input(
            BenchmarkId::new("gradient", num_nodes),
            &params,
            |b, p| b.iter(|| black_box(ansatz.gradient(p, 1e-4))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_operator_build,
    bench_minimization_diagonal,
    bench_qaoa_evaluation
);
criterion_main!(benches);
