//! Optimizers for QAOA parameter search
//!
//! | Optimizer | Type | Best For |
//! |-----------|------|----------|
//! | SGD | Gradient | Simple landscapes |
//! | SGD+Momentum | Gradient | Smoother convergence |
//! | Adam | Gradient | Adaptive, noisy gradients |
//! | SPSA | Gradient-free | Noisy evaluations |
//!
//! Convergence is declared once the best objective has not improved by more
//! than `tolerance` for `patience` consecutive iterations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MaxCutError, Result};

// =============================================================================
// Constants
// =============================================================================

/// Default learning rate
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default momentum coefficient
pub const DEFAULT_MOMENTUM: f64 = 0.9;

/// Default Adam beta1
pub const DEFAULT_BETA1: f64 = 0.9;

/// Default Adam beta2
pub const DEFAULT_BETA2: f64 = 0.999;

/// Default epsilon for numerical stability
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// Default SPSA perturbation
pub const DEFAULT_SPSA_C: f64 = 0.1;

/// Default SPSA alpha
pub const DEFAULT_SPSA_ALPHA: f64 = 0.602;

/// Default SPSA gamma
pub const DEFAULT_SPSA_GAMMA: f64 = 0.101;

/// Default convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default stall window
pub const DEFAULT_PATIENCE: usize = 10;

/// Default max iterations
pub const DEFAULT_MAX_ITER: usize = 100;

// =============================================================================
// Optimizer Type
// =============================================================================

/// Optimizer algorithm type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerType {
    /// Stochastic Gradient Descent
    SGD,
    /// SGD with Momentum
    Momentum,
    /// Adam (Adaptive Moment Estimation)
    #[default]
    Adam,
    /// SPSA (Simultaneous Perturbation Stochastic Approximation)
    SPSA,
}

impl OptimizerType {
    /// Check if gradient-based
    pub fn is_gradient_based(&self) -> bool {
        !matches!(self, OptimizerType::SPSA)
    }

    /// String name
    pub fn name(&self) -> &'static str {
        match self {
            OptimizerType::SGD => "SGD",
            OptimizerType::Momentum => "Momentum",
            OptimizerType::Adam => "Adam",
            OptimizerType::SPSA => "SPSA",
        }
    }
}

// =============================================================================
// Optimizer State
// =============================================================================

/// Internal state for Adam optimizer
#[derive(Debug, Clone)]
struct AdamState {
    /// First moment estimate (mean of gradients)
    m: Vec<f64>,
    /// Second moment estimate (mean of squared gradients)
    v: Vec<f64>,
    /// Timestep
    t: usize,
}

impl AdamState {
    fn new(n_params: usize) -> Self {
        Self {
            m: vec![0.0; n_params],
            v: vec![0.0; n_params],
            t: 0,
        }
    }
}

/// Internal state for SPSA
#[derive(Debug, Clone)]
struct SPSAState {
    /// Current iteration
    k: usize,
    /// Perturbation coefficient
    c: f64,
    /// Learning rate coefficient
    a: f64,
    /// Alpha exponent
    alpha: f64,
    /// Gamma exponent
    gamma: f64,
    /// Bernoulli ±1 perturbation source
    rng: StdRng,
}

impl SPSAState {
    fn new(a: f64, seed: u64) -> Self {
        Self {
            k: 0,
            c: DEFAULT_SPSA_C,
            a,
            alpha: DEFAULT_SPSA_ALPHA,
            gamma: DEFAULT_SPSA_GAMMA,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// a_k = a / (k + 1)^alpha
    fn learning_rate(&self) -> f64 {
        self.a / ((self.k + 1) as f64).powf(self.alpha)
    }

    /// c_k = c / (k + 1)^gamma
    fn perturbation(&self) -> f64 {
        self.c / ((self.k + 1) as f64).powf(self.gamma)
    }
}

// =============================================================================
// Optimizer Configuration
// =============================================================================

/// Optimizer configuration
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Optimizer type
    pub optimizer_type: OptimizerType,
    /// Learning rate (SPSA: the `a` coefficient)
    pub learning_rate: f64,
    /// Momentum coefficient
    pub momentum: f64,
    /// Beta1 (for Adam)
    pub beta1: f64,
    /// Beta2 (for Adam)
    pub beta2: f64,
    /// Epsilon for numerical stability
    pub epsilon: f64,
    /// Maximum iterations
    pub max_iter: usize,
    /// Minimum improvement that resets the stall counter
    pub tolerance: f64,
    /// Iterations without improvement before declaring convergence
    pub patience: usize,
    /// Seed for SPSA perturbations
    pub seed: u64,
}

impl OptimizerConfig {
    /// Config for an optimizer type with the given learning rate
    pub fn new(optimizer_type: OptimizerType, learning_rate: f64) -> Self {
        Self {
            optimizer_type,
            learning_rate,
            ..Default::default()
        }
    }

    /// Builder: set max iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Builder: set tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder: set stall window
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Builder: set SPSA seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            optimizer_type: OptimizerType::Adam,
            learning_rate: DEFAULT_LEARNING_RATE,
            momentum: DEFAULT_MOMENTUM,
            beta1: DEFAULT_BETA1,
            beta2: DEFAULT_BETA2,
            epsilon: DEFAULT_EPSILON,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            patience: DEFAULT_PATIENCE,
            seed: 42,
        }
    }
}

// =============================================================================
// Optimization Result
// =============================================================================

/// Result of optimization
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameters seen
    pub params: Vec<f64>,
    /// Best objective value seen
    pub objective: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Number of objective evaluations
    pub func_evals: usize,
    /// Stall criterion met before the budget ran out
    pub converged: bool,
    /// History of objective values
    pub history: Vec<f64>,
}

// =============================================================================
// Optimizer
// =============================================================================

/// Stateful optimizer over a parameter vector
#[derive(Debug)]
pub struct Optimizer {
    config: OptimizerConfig,
    params: Vec<f64>,
    velocity: Vec<f64>,
    adam_state: Option<AdamState>,
    spsa_state: Option<SPSAState>,
    best_objective: f64,
    best_params: Vec<f64>,
    steps_without_improvement: usize,
}

impl Optimizer {
    /// Create new optimizer with config
    pub fn new(config: OptimizerConfig, initial_params: Vec<f64>) -> Self {
        let n_params = initial_params.len();

        let adam_state = (config.optimizer_type == OptimizerType::Adam)
            .then(|| AdamState::new(n_params));
        let spsa_state = (config.optimizer_type == OptimizerType::SPSA)
            .then(|| SPSAState::new(config.learning_rate, config.seed));

        Self {
            config,
            velocity: vec![0.0; n_params],
            params: initial_params.clone(),
            adam_state,
            spsa_state,
            best_objective: f64::INFINITY,
            best_params: initial_params,
            steps_without_improvement: 0,
        }
    }

    /// Get current parameters
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Get best parameters
    pub fn best_params(&self) -> &[f64] {
        &self.best_params
    }

    pub fn best_objective(&self) -> f64 {
        self.best_objective
    }

    // -------------------------------------------------------------------------
    // Step Functions
    // -------------------------------------------------------------------------

    /// Perform single optimization step with gradients
    pub fn step(&mut self, gradients: &[f64]) {
        assert_eq!(gradients.len(), self.params.len());

        let update = match self.config.optimizer_type {
            OptimizerType::Momentum => self.momentum_update(gradients),
            OptimizerType::Adam => self.adam_update(gradients),
            _ => self.sgd_update(gradients),
        };

        for (p, u) in self.params.iter_mut().zip(update.iter()) {
            *p += u;
        }
    }

    /// SGD update: Δθ = -lr * g
    fn sgd_update(&self, gradients: &[f64]) -> Vec<f64> {
        gradients
            .iter()
            .map(|g| -self.config.learning_rate * g)
            .collect()
    }

    /// Momentum update: v = μv - lr*g, Δθ = v
    fn momentum_update(&mut self, gradients: &[f64]) -> Vec<f64> {
        let lr = self.config.learning_rate;
        let mu = self.config.momentum;

        for (v, g) in self.velocity.iter_mut().zip(gradients.iter()) {
            *v = mu * (*v) - lr * g;
        }

        self.velocity.clone()
    }

    /// Adam update
    fn adam_update(&mut self, gradients: &[f64]) -> Vec<f64> {
        let lr = self.config.learning_rate;
        let beta1 = self.config.beta1;
        let beta2 = self.config.beta2;
        let eps = self.config.epsilon;

        let state = self
            .adam_state
            .get_or_insert_with(|| AdamState::new(gradients.len()));
        state.t += 1;

        // Bias correction factors
        let bias_correction1 = 1.0 - beta1.powi(state.t as i32);
        let bias_correction2 = 1.0 - beta2.powi(state.t as i32);

        gradients
            .iter()
            .enumerate()
            .map(|(i, &g)| {
                state.m[i] = beta1 * state.m[i] + (1.0 - beta1) * g;
                state.v[i] = beta2 * state.v[i] + (1.0 - beta2) * g * g;

                let m_hat = state.m[i] / bias_correction1;
                let v_hat = state.v[i] / bias_correction2;

                -lr * m_hat / (v_hat.sqrt() + eps)
            })
            .collect()
    }

    /// SPSA step; returns the number of objective evaluations used
    pub fn step_spsa<F>(&mut self, objective_fn: &F) -> usize
    where
        F: Fn(&[f64]) -> f64,
    {
        let (a, seed) = (self.config.learning_rate, self.config.seed);
        let state = self
            .spsa_state
            .get_or_insert_with(|| SPSAState::new(a, seed));
        state.k += 1;

        let a_k = state.learning_rate();
        let c_k = state.perturbation();

        // Bernoulli ±1 perturbation
        let delta: Vec<f64> = (0..self.params.len())
            .map(|_| if state.rng.gen_bool(0.5) { 1.0 } else { -1.0 })
            .collect();

        let params_plus: Vec<f64> = self
            .params
            .iter()
            .zip(&delta)
            .map(|(p, d)| p + c_k * d)
            .collect();
        let params_minus: Vec<f64> = self
            .params
            .iter()
            .zip(&delta)
            .map(|(p, d)| p - c_k * d)
            .collect();

        let f_plus = objective_fn(&params_plus);
        let f_minus = objective_fn(&params_minus);

        for (p, d) in self.params.iter_mut().zip(&delta) {
            let g_hat = (f_plus - f_minus) / (2.0 * c_k * d);
            *p -= a_k * g_hat;
        }

        2
    }

    // -------------------------------------------------------------------------
    // Convergence
    // -------------------------------------------------------------------------

    /// Record the objective at the current parameters; true on improvement
    pub fn update_objective(&mut self, objective: f64) -> bool {
        if objective < self.best_objective - self.config.tolerance {
            self.best_objective = objective;
            self.best_params = self.params.clone();
            self.steps_without_improvement = 0;
            true
        } else {
            if objective < self.best_objective {
                self.best_objective = objective;
                self.best_params = self.params.clone();
            }
            self.steps_without_improvement += 1;
            false
        }
    }

    /// Best objective stable for `patience` iterations
    pub fn has_stalled(&self) -> bool {
        self.steps_without_improvement >= self.config.patience
    }
}

// =============================================================================
// Optimization Loop
// =============================================================================

/// Run the optimization loop
///
/// `gradient_fn` is ignored by SPSA. Fails with [`MaxCutError::SolverFailed`]
/// if the objective becomes non-finite.
pub fn minimize<F, G>(
    config: OptimizerConfig,
    initial_params: Vec<f64>,
    objective_fn: F,
    gradient_fn: G,
) -> Result<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    let max_iter = config.max_iter;
    let optimizer_type = config.optimizer_type;
    let mut optimizer = Optimizer::new(config, initial_params);
    let mut history = Vec::with_capacity(max_iter);
    let mut func_evals = 0;
    let mut converged = false;

    for iter in 0..max_iter {
        let objective = objective_fn(optimizer.params());
        func_evals += 1;

        if !objective.is_finite() {
            return Err(MaxCutError::SolverFailed(format!(
                "objective became {objective} at iteration {iter}"
            )));
        }
        history.push(objective);
        optimizer.update_objective(objective);

        debug!(
            iter,
            objective,
            best = optimizer.best_objective(),
            "optimizer step"
        );

        if optimizer.has_stalled() {
            converged = true;
            break;
        }

        if optimizer_type.is_gradient_based() {
            let gradients = gradient_fn(optimizer.params());
            func_evals += 2 * gradients.len();
            optimizer.step(&gradients);
        } else {
            func_evals += optimizer.step_spsa(&objective_fn);
        }
    }

    Ok(OptimizationResult {
        params: optimizer.best_params().to_vec(),
        objective: optimizer.best_objective(),
        iterations: history.len(),
        func_evals,
        converged,
        history,
    })
}

// =============================================================================
// Tests
// =============================================================================
