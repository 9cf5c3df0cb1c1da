//! Console lines and the JSON run report

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use maxcut_core::{Edge, RunOutcome};

/// The two stdout lines
pub fn console_lines(outcome: &RunOutcome) -> [String; 2] {
    [
        format!("Optimal Cut Value: {:.2}", outcome.cut_value),
        format!("Best Configuration: {}", outcome.solution),
    ]
}

/// Serialised summary of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub num_nodes: usize,
    pub edges: Vec<Edge>,
    pub encoding: &'static str,
    pub solver: &'static str,
    pub labels: Vec<u8>,
    pub state: u64,
    pub cut_value: f64,
    pub expected_cut: f64,
    pub eigenvalue: f64,
    pub probability: f64,
    pub converged: bool,
    pub iterations: usize,
    pub function_evals: usize,
    pub optimal_params: Vec<f64>,
    /// Present when the exhaustive optimum could be computed
    pub approximation_ratio: Option<f64>,
}

impl RunReport {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        let result = &outcome.result;
        Self {
            num_nodes: outcome.graph.num_nodes(),
            edges: outcome.graph.edges().to_vec(),
            encoding: outcome.operator.encoding().name(),
            solver: result.solver,
            labels: outcome.solution.labels().to_vec(),
            state: result.best_measurement.state,
            cut_value: outcome.cut_value,
            expected_cut: outcome.expected_cut,
            eigenvalue: result.eigenvalue,
            probability: result.best_measurement.probability,
            converged: result.converged,
            iterations: result.iterations,
            function_evals: result.function_evals,
            optimal_params: result.optimal_params.clone(),
            approximation_ratio: outcome.approximation_ratio().ok(),
        }
    }

    /// Write pretty-printed JSON, overwriting `path`
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialising run report")?;
        std::fs::write(path, json).with_context(|| format!("writing report {}", path.display()))
    }
}
