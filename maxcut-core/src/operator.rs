//! Cost Operator Builder
//!
//! Encodes a [`Graph`] as a Max-Cut cost function over bitstrings, in two
//! representations:
//!
//! - **Sparse**: a sum of Pauli ZZ terms, one per edge,
//!   H = Σ_{(i,j)∈E} (w_ij / 2) Z_i Z_j
//! - **Dense**: the 2^n diagonal whose entry k is the cut weight of state k.
//!
//! # Energy convention
//!
//! Solvers always *minimise* [`CostOperator::minimization_diagonal`].
//!
//! ```text
//! Sparse:  E(k) = Σ_t c_t Π z_q(k),   cut(k) = offset - E(k),  offset = Σ_t c_t = W/2
//! Dense:   E(k) = -cut(k),            cut(k) = -E(k)
//! ```
//!
//! where z_q(k) = +1 if bit q of k is 0 and -1 otherwise. Both encodings
//! therefore report the same cut weight for every state once
//! [`CostOperator::cut_value`] is applied.

use std::fmt;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{MaxCutError, Result};
use crate::graph::Graph;

// =============================================================================
// Encoding Selection
// =============================================================================

/// Which operator representation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Pauli ZZ terms with coefficient w/2
    #[default]
    Sparse,
    /// Dense 2^n cut-weight diagonal
    Dense,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Sparse => "sparse",
            Encoding::Dense => "dense",
        }
    }
}

// =============================================================================
// Sparse Pauli Operator
// =============================================================================

/// One Pauli string with its coefficient
///
/// Character i of `label` acts on qubit i; the alphabet is {I, Z}.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PauliTerm {
    pub label: String,
    pub coeff: f64,
}

impl PauliTerm {
    /// Qubits carrying a Z
    pub fn z_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.label
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'Z')
            .map(|(q, _)| q)
    }

    /// Eigenvalue of this term on basis state k
    #[inline]
    pub fn eigenvalue(&self, state: usize) -> f64 {
        let parity = self
            .z_positions()
            .fold(0usize, |acc, q| acc ^ ((state >> q) & 1));
        if parity == 0 {
            self.coeff
        } else {
            -self.coeff
        }
    }
}

/// Sum of diagonal Pauli strings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparsePauliOp {
    num_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl SparsePauliOp {
    /// Empty operator on n qubits
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            terms: Vec::new(),
        }
    }

    /// Add a term, summing coefficients when the label is already present
    pub fn add_term(&mut self, label: String, coeff: f64) -> Result<()> {
        if label.len() != self.num_qubits {
            return Err(MaxCutError::invalid_graph(format!(
                "Pauli label '{label}' has length {}, expected {}",
                label.len(),
                self.num_qubits
            )));
        }
        if let Some(b) = label.bytes().find(|b| *b != b'I' && *b != b'Z') {
            return Err(MaxCutError::invalid_graph(format!(
                "Pauli label '{label}' contains unsupported operator '{}'",
                b as char
            )));
        }

        match self.terms.iter_mut().find(|t| t.label == label) {
            Some(term) => term.coeff += coeff,
            None => self.terms.push(PauliTerm { label, coeff }),
        }
        Ok(())
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Coefficient for a label, if present
    pub fn coefficient(&self, label: &str) -> Option<f64> {
        self.terms
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.coeff)
    }

    /// Constant separating the ZZ energy from the cut weight: Σ_t c_t
    pub fn constant_offset(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff).sum()
    }

    /// Energy of basis state k
    pub fn energy(&self, state: usize) -> f64 {
        self.terms.iter().map(|t| t.eigenvalue(state)).sum()
    }

    /// Energies of all 2^n basis states
    pub fn diagonal(&self) -> Array1<f64> {
        Array1::from_shape_fn(1usize << self.num_qubits, |k| self.energy(k))
    }
}

impl fmt::Display for SparsePauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:.4} * {}", term.coeff, term.label)?;
        }
        Ok(())
    }
}

// =============================================================================
// Dense Diagonal Operator
// =============================================================================

/// Cut weight for every basis state, stored as the matrix diagonal
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalOperator {
    num_qubits: usize,
    diagonal: Array1<f64>,
}

impl DiagonalOperator {
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Entry k = cut weight of state k
    pub fn diagonal(&self) -> &Array1<f64> {
        &self.diagonal
    }

    pub fn cut_weight(&self, state: usize) -> f64 {
        self.diagonal[state]
    }

    /// Full 2^n x 2^n matrix
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_diag(&self.diagonal)
    }
}

// =============================================================================
// Cost Operator
// =============================================================================

/// Either representation, with the canonical minimisation convention
#[derive(Debug, Clone, PartialEq)]
pub enum CostOperator {
    Sparse(SparsePauliOp),
    Dense(DiagonalOperator),
}

impl CostOperator {
    pub fn encoding(&self) -> Encoding {
        match self {
            CostOperator::Sparse(_) => Encoding::Sparse,
            CostOperator::Dense(_) => Encoding::Dense,
        }
    }

    pub fn num_qubits(&self) -> usize {
        match self {
            CostOperator::Sparse(op) => op.num_qubits(),
            CostOperator::Dense(op) => op.num_qubits(),
        }
    }

    /// Energies to minimise, one per basis state
    pub fn minimization_diagonal(&self) -> Array1<f64> {
        match self {
            CostOperator::Sparse(op) => op.diagonal(),
            CostOperator::Dense(op) => op.diagonal().mapv(|c| -c),
        }
    }

    /// Map a minimised energy back to a cut weight
    pub fn cut_value(&self, energy: f64) -> f64 {
        match self {
            CostOperator::Sparse(op) => op.constant_offset() - energy,
            CostOperator::Dense(_) => -energy,
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Pauli label with Z on qubits i and j
fn zz_label(num_qubits: usize, i: usize, j: usize) -> String {
    (0..num_qubits)
        .map(|q| if q == i || q == j { 'Z' } else { 'I' })
        .collect()
}

/// One ZZ term per edge with coefficient w/2
pub fn build_sparse_operator(graph: &Graph) -> Result<SparsePauliOp> {
    graph.validate()?;

    let n = graph.num_nodes();
    let mut op = SparsePauliOp::new(n);
    for edge in graph.edges() {
        op.add_term(zz_label(n, edge.u, edge.v), edge.weight / 2.0)?;
    }

    Ok(op)
}

/// Cut weight of every basis state
pub fn build_dense_operator(graph: &Graph) -> Result<DiagonalOperator> {
    graph.validate()?;

    let n = graph.num_nodes();
    let mut diagonal = Array1::<f64>::zeros(1usize << n);
    for (k, entry) in diagonal.iter_mut().enumerate() {
        for edge in graph.edges() {
            if edge.is_cut_by_state(k) {
                *entry += edge.weight;
            }
        }
    }

    Ok(DiagonalOperator {
        num_qubits: n,
        diagonal,
    })
}

/// Build the requested representation
pub fn build_cost_operator(graph: &Graph, encoding: Encoding) -> Result<CostOperator> {
    match encoding {
        Encoding::Sparse => build_sparse_operator(graph).map(CostOperator::Sparse),
        Encoding::Dense => build_dense_operator(graph).map(CostOperator::Dense),
    }
}

// =============================================================================
// Tests
// =============================================================================
