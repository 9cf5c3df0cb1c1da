//! End-to-end pipeline tests
//!
//! Validates:
//! - Exact and QAOA solvers through `run`
//! - Stage tagging of failures
//! - Ring-with-chord graph family
//! - Config files

use std::io::Write;

use maxcut_core::{
    run, Edge, Encoding, ExactEigensolver, GraphSpec, MaxCutError, MinimumEigensolver,
    OptimizerType, QaoaSolver, RunConfig, SolverConfig, Stage,
};
use tempfile::NamedTempFile;

const EPSILON: f64 = 1e-9;

// =============================================================================
// Exact Solver
// =============================================================================

#[test]
fn test_exact_reference_cut() {
    for encoding in [Encoding::Sparse, Encoding::Dense] {
        let config = RunConfig::default().with_encoding(encoding);
        let outcome = run(&config, &ExactEigensolver).unwrap();

        assert!((outcome.cut_value - 4.0).abs() < EPSILON);
        let (zeros, ones) = outcome.solution.partition();
        // {0, 2} | {1, 3} in some orientation
        let mut sides = [zeros, ones];
        sides.sort();
        assert_eq!(sides, [vec![0, 2], vec![1, 3]]);
    }
}

#[test]
fn test_exact_matches_brute_force() {
    let spec = GraphSpec::Edges {
        nodes: 6,
        edges: vec![
            Edge::weighted(0, 1, 1.5),
            Edge::weighted(1, 2, 2.0),
            Edge::weighted(2, 3, 0.5),
            Edge::weighted(3, 4, 1.0),
            Edge::weighted(4, 5, 3.0),
            Edge::weighted(5, 0, 1.0),
            Edge::weighted(0, 3, 2.5),
        ],
    };
    let graph = spec.build();
    let (_, optimum) = graph.brute_force_max_cut().unwrap();

    let outcome = run(&RunConfig::for_graph(spec), &ExactEigensolver).unwrap();
    assert!((outcome.cut_value - optimum).abs() < EPSILON);
    assert!((graph.cut_value(outcome.solution.labels()) - optimum).abs() < EPSILON);
}

// =============================================================================
// QAOA Solver
// =============================================================================

#[test]
fn test_qaoa_reference_run() {
    let config = RunConfig::default().with_solver(SolverConfig::default().allow_unconverged());
    let outcome = run(&config, &QaoaSolver::new()).unwrap();

    let labels = outcome.solution.labels();
    assert_eq!(labels.len(), 4);
    assert!(labels.iter().all(|&b| b <= 1));

    // Reported cut is the cut of the displayed partition
    assert!((outcome.graph.cut_value(labels) - outcome.cut_value).abs() < EPSILON);
    assert!(outcome.cut_value <= 4.0 + EPSILON);
    // Optimized expectation beats a uniformly random partition (2.5)
    assert!(outcome.expected_cut > 2.5);
    assert_eq!(outcome.result.solver, "qaoa");
}

#[test]
fn test_qaoa_dense_encoding() {
    let config = RunConfig::default()
        .with_encoding(Encoding::Dense)
        .with_solver(SolverConfig::default().with_reps(1).allow_unconverged());
    let outcome = run(&config, &QaoaSolver::new()).unwrap();

    let labels = outcome.solution.labels();
    assert!((outcome.graph.cut_value(labels) - outcome.cut_value).abs() < EPSILON);
}

#[test]
fn test_qaoa_seed_determinism() {
    let solver_config = SolverConfig::default()
        .with_optimizer(OptimizerType::Momentum)
        .with_max_iter(30)
        .with_seed(11)
        .allow_unconverged();
    let config = RunConfig::default().with_solver(solver_config);

    let a = run(&config, &QaoaSolver::new()).unwrap();
    let b = run(&config, &QaoaSolver::new()).unwrap();

    assert_eq!(a.solution, b.solution);
    assert_eq!(a.result.optimal_params, b.result.optimal_params);
}

#[test]
fn test_strict_convergence_failure_is_solve_stage() {
    let config = RunConfig::default().with_solver(SolverConfig::default().with_max_iter(1));
    let err = run(&config, &QaoaSolver::new()).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Solve));
    assert!(err.is_solver_error());
    assert!(matches!(
        err.root(),
        MaxCutError::SolverDidNotConverge { iterations: 1, .. }
    ));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_bad_endpoint_is_operator_stage() {
    let config = RunConfig::for_graph(GraphSpec::Edges {
        nodes: 4,
        edges: vec![Edge::new(0, 1), Edge::new(0, 5)],
    });

    for solver in [&ExactEigensolver as &dyn MinimumEigensolver, &QaoaSolver::new()] {
        let err = run(&config, solver).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Operator));
        assert!(matches!(err.root(), MaxCutError::InvalidGraph { .. }));
    }
}

#[test]
fn test_oversized_graph_is_graph_stage() {
    let config = RunConfig::for_graph(GraphSpec::Cycle { nodes: 32 });
    let err = run(&config, &ExactEigensolver).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Graph));
    assert!(matches!(err.root(), MaxCutError::GraphTooLarge { .. }));
}

// =============================================================================
// Graph Family
// =============================================================================

#[test]
fn test_ring_with_chord_family() {
    let four = GraphSpec::RingWithChord { nodes: 4 }.build();
    let pairs: Vec<(usize, usize)> = four.edges().iter().map(|e| (e.u, e.v)).collect();
    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3), (3, 0), (1, 3)]);

    let six = GraphSpec::RingWithChord { nodes: 6 }.build();
    assert_eq!(six.num_edges(), 7);

    let outcome = run(
        &RunConfig::for_graph(GraphSpec::RingWithChord { nodes: 6 }),
        &ExactEigensolver,
    )
    .unwrap();
    assert!((outcome.cut_value - six.brute_force_max_cut().unwrap().1).abs() < EPSILON);
}

// =============================================================================
// Config Files
// =============================================================================

#[test]
fn test_config_file_run() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
encoding = "dense"

[graph]
kind = "edges"
nodes = 3
edges = [{{ u = 0, v = 1 }}, {{ u = 1, v = 2, weight = 2.0 }}]

[solver]
reps = 1
strict_convergence = false
"#
    )
    .unwrap();

    let config = RunConfig::from_file(file.path()).unwrap();
    let outcome = run(&config, &ExactEigensolver).unwrap();
    assert!((outcome.cut_value - 3.0).abs() < EPSILON);
}
