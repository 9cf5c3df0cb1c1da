//! Gate application on [`StateVector`]
//!
//! Only what QAOA on a diagonal cost needs: single-qubit gates for the mixer
//! and a diagonal phase for the cost layer.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::state::StateVector;

/// Rotation around X-axis: RX(θ) = exp(-iθX/2)
pub fn rx(theta: f64) -> Array2<Complex64> {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    Array2::from_shape_fn((2, 2), |(r, col)| if r == col { c } else { s })
}

/// Applies a single-qubit gate to `qubit`.
///
/// The state is viewed as (Outer, 2, Inner) with Inner = 2^qubit; the middle
/// axis is the target qubit.
pub fn apply_gate_1q(state: &mut StateVector, qubit: usize, gate: &Array2<Complex64>) {
    let total_dim = state.dimension();
    let inner_dim = 1usize << qubit;
    let outer_dim = total_dim / (2 * inner_dim);

    let u00 = gate[[0, 0]];
    let u01 = gate[[0, 1]];
    let u10 = gate[[1, 0]];
    let u11 = gate[[1, 1]];

    let amps = &mut state.amplitudes;
    for block in 0..outer_dim {
        let base = block * 2 * inner_dim;
        for i in 0..inner_dim {
            let i0 = base + i;
            let i1 = i0 + inner_dim;
            let alpha = amps[i0];
            let beta = amps[i1];

            amps[i0] = u00 * alpha + u01 * beta;
            amps[i1] = u10 * alpha + u11 * beta;
        }
    }
}

/// Applies exp(-i·angle·D) for a diagonal operator D
pub fn apply_diagonal_phase(state: &mut StateVector, diagonal: &Array1<f64>, angle: f64) {
    for (amp, &d) in state.amplitudes.iter_mut().zip(diagonal.iter()) {
        *amp *= Complex64::new(0.0, -angle * d).exp();
    }
}
