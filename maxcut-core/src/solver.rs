//! Minimum-eigenvalue solvers over diagonal cost operators
//!
//! The pipeline only sees [`MinimumEigensolver`]. Two implementations ship:
//! - [`ExactEigensolver`]: exhaustive scan of the diagonal, deterministic
//! - [`crate::qaoa::QaoaSolver`]: variational state-vector QAOA
//!
//! Every solver minimises [`CostOperator::minimization_diagonal`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MaxCutError, Result};
use crate::operator::CostOperator;
use crate::optimizer::{
    OptimizerConfig, OptimizerType, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITER, DEFAULT_PATIENCE,
    DEFAULT_TOLERANCE,
};

// =============================================================================
// Constants
// =============================================================================

/// Default number of QAOA layers
pub const DEFAULT_REPS: usize = 2;

/// Default number of measurement shots
pub const DEFAULT_SHOTS: usize = 1024;

/// Default random seed
pub const DEFAULT_SEED: u64 = 42;

/// Default finite-difference step for gradients
pub const DEFAULT_GRADIENT_STEP: f64 = 1e-4;

// =============================================================================
// Solver Configuration
// =============================================================================

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Number of QAOA layers (p)
    pub reps: usize,
    /// Optimizer type
    pub optimizer: OptimizerType,
    /// Maximum optimizer iterations
    pub max_iter: usize,
    /// Learning rate
    pub learning_rate: f64,
    /// Minimum improvement that counts as progress
    pub tolerance: f64,
    /// Iterations without progress before convergence is declared
    pub patience: usize,
    /// Central finite-difference step for gradient-based optimizers
    pub gradient_step: f64,
    /// Fixed starting point [γ_1, β_1, ..., γ_p, β_p]; seeded random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_params: Option<Vec<f64>>,
    /// Number of measurement samples
    pub shots: usize,
    /// Random seed for initial parameters, SPSA and sampling
    pub seed: u64,
    /// Fail when the iteration budget runs out before convergence
    pub strict_convergence: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            reps: DEFAULT_REPS,
            optimizer: OptimizerType::Adam,
            max_iter: DEFAULT_MAX_ITER,
            learning_rate: DEFAULT_LEARNING_RATE,
            tolerance: DEFAULT_TOLERANCE,
            patience: DEFAULT_PATIENCE,
            gradient_step: DEFAULT_GRADIENT_STEP,
            initial_params: None,
            shots: DEFAULT_SHOTS,
            seed: DEFAULT_SEED,
            strict_convergence: true,
        }
    }
}

impl SolverConfig {
    /// Set number of layers
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Set optimizer
    pub fn with_optimizer(mut self, optimizer: OptimizerType) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set learning rate
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set stall window
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Set finite-difference step
    pub fn with_gradient_step(mut self, step: f64) -> Self {
        self.gradient_step = step;
        self
    }

    /// Start from fixed parameters instead of a seeded random point
    pub fn with_initial_params(mut self, params: Vec<f64>) -> Self {
        self.initial_params = Some(params);
        self
    }

    /// Set number of shots
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Accept results whose optimizer ran out of iterations
    pub fn allow_unconverged(mut self) -> Self {
        self.strict_convergence = false;
        self
    }

    /// Check ranges
    pub fn validate(&self) -> Result<()> {
        if self.reps == 0 {
            return Err(MaxCutError::Config("reps must be at least 1".into()));
        }
        if self.max_iter == 0 {
            return Err(MaxCutError::Config("max_iter must be at least 1".into()));
        }
        if self.patience == 0 {
            return Err(MaxCutError::Config("patience must be at least 1".into()));
        }
        if self.shots == 0 {
            return Err(MaxCutError::Config("shots must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MaxCutError::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(MaxCutError::Config(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if !(self.gradient_step.is_finite() && self.gradient_step > 0.0) {
            return Err(MaxCutError::Config(format!(
                "gradient_step must be positive, got {}",
                self.gradient_step
            )));
        }
        if let Some(params) = &self.initial_params {
            if params.len() != 2 * self.reps {
                return Err(MaxCutError::Config(format!(
                    "expected {} initial parameters for reps = {}, got {}",
                    2 * self.reps,
                    self.reps,
                    params.len()
                )));
            }
        }
        Ok(())
    }

    /// Optimizer settings derived from this config
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig::new(self.optimizer, self.learning_rate)
            .with_max_iter(self.max_iter)
            .with_tolerance(self.tolerance)
            .with_patience(self.patience)
            .with_seed(self.seed)
    }
}

// =============================================================================
// Solver Result
// =============================================================================

/// Most favourable sampled basis state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestMeasurement {
    /// Basis-state index, bit i = node i
    pub state: u64,
    /// Energy of `state` under the minimisation diagonal
    pub value: f64,
    /// Observed frequency (1.0 for exact solvers)
    pub probability: f64,
}

/// Result of a minimum-eigenvalue solve
#[derive(Debug, Clone, Serialize)]
pub struct SolverResult {
    /// Minimised energy (QAOA: optimised expectation value)
    pub eigenvalue: f64,
    pub best_measurement: BestMeasurement,
    /// Optimal parameters [γ_1, β_1, ..., γ_p, β_p]; empty for exact solvers
    pub optimal_params: Vec<f64>,
    pub iterations: usize,
    pub function_evals: usize,
    pub converged: bool,
    /// Objective per iteration
    pub energy_history: Vec<f64>,
    /// Name of the solver that produced this result
    pub solver: &'static str,
}

// =============================================================================
// Solver Trait
// =============================================================================

/// Finds the lowest-energy basis state of a diagonal cost operator
pub trait MinimumEigensolver {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Minimise `operator` under `config`
    fn solve(&self, operator: &CostOperator, config: &SolverConfig) -> Result<SolverResult>;
}

// =============================================================================
// Exact Eigensolver
// =============================================================================

/// Brute-force scan of the diagonal
///
/// Deterministic: the lowest index wins ties. Ignores every config field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactEigensolver;

impl MinimumEigensolver for ExactEigensolver {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn solve(&self, operator: &CostOperator, _config: &SolverConfig) -> Result<SolverResult> {
        let diagonal = operator.minimization_diagonal();

        let mut best: Option<(usize, f64)> = None;
        for (state, &energy) in diagonal.iter().enumerate() {
            if !energy.is_finite() {
                return Err(MaxCutError::SolverFailed(format!(
                    "energy of state {state} is {energy}"
                )));
            }
            if best.map_or(true, |(_, e)| energy < e) {
                best = Some((state, energy));
            }
        }

        let (state, value) =
            best.ok_or_else(|| MaxCutError::SolverFailed("empty operator diagonal".into()))?;
        debug!(state, value, "exact minimum");

        Ok(SolverResult {
            eigenvalue: value,
            best_measurement: BestMeasurement {
                state: state as u64,
                value,
                probability: 1.0,
            },
            optimal_params: Vec::new(),
            iterations: 1,
            function_evals: diagonal.len(),
            converged: true,
            energy_history: vec![value],
            solver: self.name(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
