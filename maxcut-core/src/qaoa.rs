//! QAOA Solver
//!
//! Variational minimisation of a diagonal cost operator:
//! 1. Build the ansatz from the operator's minimisation diagonal
//! 2. Optimize [γ, β] with a classical optimizer
//! 3. Sample the optimized state
//! 4. Report the lowest-energy sampled state
//!
//! # Example
//!
//! ```
//! use maxcut_core::graph::Graph;
//! use maxcut_core::operator::{build_cost_operator, Encoding};
//! use maxcut_core::qaoa::QaoaSolver;
//! use maxcut_core::solver::{MinimumEigensolver, SolverConfig};
//!
//! let op = build_cost_operator(&Graph::reference(), Encoding::Sparse).unwrap();
//! let config = SolverConfig::default().allow_unconverged();
//! let result = QaoaSolver::new().solve(&op, &config).unwrap();
//!
//! assert!(op.cut_value(result.best_measurement.value) >= 3.0);
//! ```

use tracing::{debug, info, warn};

use crate::ansatz::QaoaAnsatz;
use crate::error::{MaxCutError, Result};
use crate::operator::CostOperator;
use crate::optimizer::minimize;
use crate::sampler::sample_counts;
use crate::solver::{BestMeasurement, MinimumEigensolver, SolverConfig, SolverResult};

/// Default grid resolution per parameter for [`QaoaSolver::grid`]
pub const DEFAULT_GRID_POINTS: usize = 16;

/// State-vector QAOA eigensolver
///
/// Optimizes [γ, β] with the configured optimizer, or, when built with
/// [`QaoaSolver::grid`], scans a uniform grid over [0, π) per parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct QaoaSolver {
    grid_points: Option<usize>,
}

impl QaoaSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid search with `points_per_param` points per parameter
    ///
    /// Only practical for p = 1 or 2.
    pub fn grid(points_per_param: usize) -> Self {
        Self {
            grid_points: Some(points_per_param),
        }
    }

    fn starting_point(ansatz: &QaoaAnsatz, config: &SolverConfig) -> Vec<f64> {
        match &config.initial_params {
            Some(params) => params.clone(),
            None => ansatz.initial_params(config.seed),
        }
    }

    /// Sample the state at `params` and pick the best measurement
    fn measure(
        &self,
        ansatz: &QaoaAnsatz,
        params: &[f64],
        config: &SolverConfig,
    ) -> Result<BestMeasurement> {
        let state = ansatz.prepare_state(params);
        let counts = sample_counts(&state.probabilities(), config.shots, config.seed)?;

        let diagonal = ansatz.cost_diagonal();
        let energy = |s: u64| diagonal[s as usize];
        let (state, count) = counts
            .best_by(energy)
            .ok_or_else(|| MaxCutError::SolverFailed("no samples drawn".into()))?;

        debug!(
            distinct = counts.distinct(),
            mean_energy = counts.mean(energy),
            "sampled {} shots",
            counts.shots()
        );

        Ok(BestMeasurement {
            state,
            value: energy(state),
            probability: count as f64 / counts.shots() as f64,
        })
    }

    fn grid_search(
        &self,
        operator: &CostOperator,
        config: &SolverConfig,
        points_per_param: usize,
    ) -> Result<SolverResult> {
        if points_per_param == 0 {
            return Err(MaxCutError::Config(
                "grid needs at least 1 point per parameter".into(),
            ));
        }
        let ansatz = QaoaAnsatz::new(operator, config.reps);
        let grid = ansatz.param_grid(points_per_param);

        info!(
            qubits = ansatz.num_qubits(),
            reps = ansatz.reps(),
            points = grid.len(),
            "scanning QAOA parameter grid"
        );

        let mut best_params = Self::starting_point(&ansatz, config);
        let mut best_energy = f64::INFINITY;
        let mut energy_history = Vec::with_capacity(grid.len());

        for params in &grid {
            let energy = ansatz.expectation(params);
            energy_history.push(energy);

            if energy < best_energy {
                best_energy = energy;
                best_params = params.clone();
            }
        }

        if !best_energy.is_finite() {
            return Err(MaxCutError::SolverFailed(
                "grid search found no finite energy".into(),
            ));
        }

        let best_measurement = self.measure(&ansatz, &best_params, config)?;

        Ok(SolverResult {
            eigenvalue: best_energy,
            best_measurement,
            optimal_params: best_params,
            iterations: grid.len(),
            function_evals: grid.len(),
            converged: true,
            energy_history,
            solver: self.name(),
        })
    }
}

impl MinimumEigensolver for QaoaSolver {
    fn name(&self) -> &'static str {
        match self.grid_points {
            Some(_) => "qaoa-grid",
            None => "qaoa",
        }
    }

    fn solve(&self, operator: &CostOperator, config: &SolverConfig) -> Result<SolverResult> {
        config.validate()?;
        if let Some(points) = self.grid_points {
            return self.grid_search(operator, config, points);
        }

        let ansatz = QaoaAnsatz::new(operator, config.reps);
        let initial_params = Self::starting_point(&ansatz, config);

        info!(
            qubits = ansatz.num_qubits(),
            reps = ansatz.reps(),
            optimizer = config.optimizer.name(),
            max_iter = config.max_iter,
            "optimizing QAOA parameters"
        );

        let step = config.gradient_step;
        let outcome = minimize(
            config.optimizer_config(),
            initial_params,
            |p| ansatz.expectation(p),
            |p| ansatz.gradient(p, step),
        )?;

        if !outcome.converged {
            if config.strict_convergence {
                return Err(MaxCutError::SolverDidNotConverge {
                    iterations: outcome.iterations,
                    best_objective: outcome.objective,
                });
            }
            warn!(
                iterations = outcome.iterations,
                best_objective = outcome.objective,
                "optimizer stopped before convergence; using best parameters found"
            );
        }

        // Re-evaluated at the best parameters rather than the last iterate
        let eigenvalue = ansatz.expectation(&outcome.params);
        if !eigenvalue.is_finite() {
            return Err(MaxCutError::SolverFailed(format!(
                "expectation at optimal parameters is {eigenvalue}"
            )));
        }

        let best_measurement = self.measure(&ansatz, &outcome.params, config)?;

        info!(
            iterations = outcome.iterations,
            eigenvalue,
            best_state = best_measurement.state,
            "QAOA finished"
        );

        Ok(SolverResult {
            eigenvalue,
            best_measurement,
            optimal_params: outcome.params,
            iterations: outcome.iterations,
            function_evals: outcome.func_evals + 1,
            converged: outcome.converged,
            energy_history: outcome.history,
            solver: self.name(),
        })
    }
}
