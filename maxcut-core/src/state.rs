use ndarray::Array1;
use num_complex::Complex64;

/// State vector over n qubits, 2^n complex amplitudes.
///
/// Index mapping: bit q of the basis index is qubit q (least significant
/// first), matching the node labels produced by [`crate::decode::decode`].
#[derive(Debug, Clone)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Creates the uniform superposition |+>^n
    pub fn plus(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let amp = Complex64::new(1.0 / (dim as f64).sqrt(), 0.0);

        StateVector {
            num_qubits,
            amplitudes: Array1::from_elem(dim, amp),
        }
    }

    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn probability(&self, index: usize) -> f64 {
        if index < self.dimension() {
            self.amplitudes[index].norm_sqr()
        } else {
            0.0
        }
    }

    /// Measurement distribution over basis states
    pub fn probabilities(&self) -> Array1<f64> {
        self.amplitudes.mapv(|a| a.norm_sqr())
    }

    /// <psi|D|psi> for a diagonal observable
    pub fn expectation_diagonal(&self, diagonal: &Array1<f64>) -> f64 {
        self.amplitudes
            .iter()
            .zip(diagonal.iter())
            .map(|(a, d)| a.norm_sqr() * d)
            .sum()
    }
}

#[cfg(test)]
pub(crate) fn basis_state(num_qubits: usize, index: usize) -> StateVector {
    let mut amplitudes = Array1::<Complex64>::zeros(1usize << num_qubits);
    amplitudes[index] = Complex64::new(1.0, 0.0);
    StateVector {
        num_qubits,
        amplitudes,
    }
}
