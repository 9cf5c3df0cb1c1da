//! QAOA Ansatz
//!
//! Alternates between:
//! - Cost layer: e^{-iγC} where C is the diagonal cost operator
//! - Mixer layer: e^{-iβB} where B = Σ X_i is the transverse field
//!
//! # Theory
//!
//! The QAOA state is:
//! |ψ(γ,β)⟩ = U_B(β_p) U_C(γ_p) ... U_B(β_1) U_C(γ_1) |+⟩^n
//!
//! where:
//! - U_C(γ) = e^{-iγC}, applied as a phase per basis state since C is diagonal
//! - U_B(β) = e^{-iβB} = Π_i RX(2β)
//!
//! Parameters are ordered as [γ_1, β_1, γ_2, β_2, ..., γ_p, β_p].

use std::f64::consts::PI;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::operator::CostOperator;
use crate::ops::{apply_diagonal_phase, apply_gate_1q, rx};
use crate::state::StateVector;

/// Initial gamma range for parameter initialization
pub const GAMMA_INIT_RANGE: f64 = PI / 4.0;

/// Initial beta range for parameter initialization
pub const BETA_INIT_RANGE: f64 = PI / 4.0;

/// QAOA ansatz over a diagonal cost
#[derive(Debug, Clone)]
pub struct QaoaAnsatz {
    num_qubits: usize,
    reps: usize,
    cost_diagonal: Array1<f64>,
}

impl QaoaAnsatz {
    /// Ansatz with `reps` layers for a cost operator
    pub fn new(operator: &CostOperator, reps: usize) -> Self {
        Self::from_diagonal(operator.num_qubits(), operator.minimization_diagonal(), reps)
    }

    /// Ansatz from an explicit energy diagonal of length 2^n
    pub fn from_diagonal(num_qubits: usize, cost_diagonal: Array1<f64>, reps: usize) -> Self {
        Self {
            num_qubits,
            reps,
            cost_diagonal,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn reps(&self) -> usize {
        self.reps
    }

    /// 2 per layer: one γ and one β
    pub fn num_params(&self) -> usize {
        2 * self.reps
    }

    pub fn cost_diagonal(&self) -> &Array1<f64> {
        &self.cost_diagonal
    }

    /// Prepare |ψ(γ,β)⟩
    pub fn prepare_state(&self, params: &[f64]) -> StateVector {
        assert_eq!(params.len(), self.num_params(), "Parameter count mismatch");

        let mut state = StateVector::plus(self.num_qubits);

        for layer in params.chunks_exact(2) {
            let (gamma, beta) = (layer[0], layer[1]);

            apply_diagonal_phase(&mut state, &self.cost_diagonal, gamma);

            let mixer = rx(2.0 * beta);
            for q in 0..self.num_qubits {
                apply_gate_1q(&mut state, q, &mixer);
            }
        }

        state
    }

    /// ⟨ψ(γ,β)|C|ψ(γ,β)⟩
    pub fn expectation(&self, params: &[f64]) -> f64 {
        self.prepare_state(params)
            .expectation_diagonal(&self.cost_diagonal)
    }

    /// Central finite-difference gradient of the expectation
    pub fn gradient(&self, params: &[f64], epsilon: f64) -> Vec<f64> {
        let mut shifted = params.to_vec();
        (0..params.len())
            .map(|i| {
                shifted[i] = params[i] + epsilon;
                let plus = self.expectation(&shifted);
                shifted[i] = params[i] - epsilon;
                let minus = self.expectation(&shifted);
                shifted[i] = params[i];
                (plus - minus) / (2.0 * epsilon)
            })
            .collect()
    }

    /// Random starting point, γ in [0, GAMMA_INIT_RANGE), β in [0, BETA_INIT_RANGE)
    pub fn initial_params(&self, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..self.reps)
            .flat_map(|_| {
                let gamma = rng.gen_range(0.0..GAMMA_INIT_RANGE);
                let beta = rng.gen_range(0.0..BETA_INIT_RANGE);
                [gamma, beta]
            })
            .collect()
    }

    /// Grid over [0, π) per parameter, capped at 10000 points
    ///
    /// Only practical for p = 1 or 2.
    pub fn param_grid(&self, points_per_param: usize) -> Vec<Vec<f64>> {
        let n_params = self.num_params();
        let total = points_per_param
            .checked_pow(n_params as u32)
            .unwrap_or(usize::MAX)
            .min(10_000);

        (0..total)
            .map(|i| {
                let mut idx = i;
                (0..n_params)
                    .map(|_| {
                        let val = (idx % points_per_param) as f64 / points_per_param as f64 * PI;
                        idx /= points_per_param;
                        val
                    })
                    .collect()
            })
            .collect()
    }
}
