//! End-to-end Max-Cut run
//!
//! graph → cost operator → eigensolver → decoded partition. Every error is
//! tagged with the [`Stage`] that raised it. Nothing here prints or writes
//! files; that is left to the caller.

use tracing::info;

use crate::config::RunConfig;
use crate::decode::{decode_state, Solution};
use crate::error::{Result, Stage};
use crate::graph::Graph;
use crate::operator::{build_cost_operator, CostOperator};
use crate::solver::{MinimumEigensolver, SolverResult};

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub graph: Graph,
    pub operator: CostOperator,
    pub result: SolverResult,
    /// Partition of the best measurement
    pub solution: Solution,
    /// Cut weight of `solution`
    pub cut_value: f64,
    /// Cut weight implied by the solver's eigenvalue
    pub expected_cut: f64,
}

impl RunOutcome {
    /// Ratio of the reported cut to the exhaustive optimum
    ///
    /// Costs a full 2^n scan. Returns 1.0 for graphs with no positive cut.
    pub fn approximation_ratio(&self) -> Result<f64> {
        let (_, optimum) = self.graph.brute_force_max_cut()?;
        if optimum <= 0.0 {
            return Ok(1.0);
        }
        Ok(self.cut_value / optimum)
    }
}

/// Run the full pipeline with the given eigensolver
pub fn run(config: &RunConfig, solver: &dyn MinimumEigensolver) -> Result<RunOutcome> {
    config.validate_graph().map_err(|e| e.at(Stage::Graph))?;
    config.solver.validate().map_err(|e| e.at(Stage::Solve))?;

    let graph = config.graph.build();
    info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        total_weight = graph.total_weight(),
        "graph ready"
    );

    let operator =
        build_cost_operator(&graph, config.encoding).map_err(|e| e.at(Stage::Operator))?;
    info!(
        encoding = config.encoding.name(),
        qubits = operator.num_qubits(),
        "cost operator built"
    );

    let result = solver
        .solve(&operator, &config.solver)
        .map_err(|e| e.at(Stage::Solve))?;

    let best = result.best_measurement;
    let solution =
        decode_state(best.state, graph.num_nodes()).map_err(|e| e.at(Stage::Decode))?;

    let cut_value = operator.cut_value(best.value);
    let expected_cut = operator.cut_value(result.eigenvalue);
    info!(
        solver = solver.name(),
        cut_value,
        expected_cut,
        probability = best.probability,
        converged = result.converged,
        "solution decoded: {solution}"
    );

    Ok(RunOutcome {
        graph,
        operator,
        result,
        solution,
        cut_value,
        expected_cut,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphSpec;
    use crate::error::MaxCutError;
    use crate::graph::Edge;
    use crate::operator::Encoding;
    use crate::solver::{ExactEigensolver, SolverConfig};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_exact_reference_run() {
        let outcome = run(&RunConfig::default(), &ExactEigensolver).unwrap();

        assert!((outcome.cut_value - 4.0).abs() < EPSILON);
        assert!((outcome.expected_cut - 4.0).abs() < EPSILON);
        assert_eq!(outcome.solution.labels(), &[1, 0, 1, 0]);
        assert!((outcome.graph.cut_value(outcome.solution.labels()) - 4.0).abs() < EPSILON);
        assert!((outcome.approximation_ratio().unwrap() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_invalid_edge_fails_at_operator_stage() {
        let config = RunConfig::for_graph(GraphSpec::Edges {
            nodes: 4,
            edges: vec![Edge::new(0, 5)],
        });
        let err = run(&config, &ExactEigensolver).unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Operator));
        assert!(matches!(err.root(), MaxCutError::InvalidGraph { .. }));
    }

    #[test]
    fn test_bad_solver_config_fails_at_solve_stage() {
        for solver_config in [
            SolverConfig::default().with_shots(0),
            SolverConfig::default().with_reps(0),
            SolverConfig::default().with_learning_rate(-0.1),
        ] {
            let config = RunConfig::default().with_solver(solver_config);
            let err = run(&config, &ExactEigensolver).unwrap_err();

            assert_eq!(err.stage(), Some(Stage::Solve));
            assert!(matches!(err.root(), MaxCutError::Config(_)));
        }
    }

    #[test]
    fn test_oversized_graph_fails_at_graph_stage() {
        let config = RunConfig::for_graph(GraphSpec::Star { nodes: 25 })
            .with_solver(SolverConfig::default().with_shots(0));
        let err = run(&config, &ExactEigensolver).unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Graph));
        assert!(matches!(err.root(), MaxCutError::GraphTooLarge { .. }));
    }

    #[test]
    fn test_encodings_agree() {
        let spec = GraphSpec::Edges {
            nodes: 5,
            edges: vec![
                Edge::weighted(0, 1, 2.0),
                Edge::weighted(1, 2, 0.5),
                Edge::new(2, 3),
                Edge::weighted(3, 4, 3.0),
                Edge::new(4, 0),
            ],
        };

        let sparse = run(&RunConfig::for_graph(spec.clone()), &ExactEigensolver).unwrap();
        let dense = run(
            &RunConfig::for_graph(spec).with_encoding(Encoding::Dense),
            &ExactEigensolver,
        )
        .unwrap();

        assert!((sparse.cut_value - dense.cut_value).abs() < EPSILON);
    }
}
