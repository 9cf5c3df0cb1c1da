//! Weighted Max-Cut as a minimum-eigenvalue problem
//!
//! A graph is encoded as a diagonal cost operator (sparse Pauli ZZ terms or a
//! dense cut-weight diagonal), minimised by a [`MinimumEigensolver`], and the
//! winning basis state is decoded into per-node partition labels.
//!
//! # Example
//!
//! ```
//! use maxcut_core::{run, ExactEigensolver, RunConfig};
//!
//! let outcome = run(&RunConfig::default(), &ExactEigensolver).unwrap();
//! assert_eq!(outcome.cut_value, 4.0);
//! assert_eq!(outcome.solution.to_string(), "[1, 0, 1, 0]");
//! ```

pub mod ansatz; // QAOA cost/mixer layers over a diagonal
pub mod config; // RunConfig, GraphSpec, TOML loading
pub mod decode; // State index -> partition labels
pub mod error;
pub mod graph;
pub mod operator; // Sparse Pauli and dense diagonal cost operators
pub mod ops;
pub mod optimizer; // SGD, Momentum, Adam, SPSA
pub mod pipeline;
pub mod qaoa;
pub mod sampler; // Seeded shot sampling
pub mod solver; // MinimumEigensolver seam and the exact solver
pub mod state;

pub use ansatz::QaoaAnsatz;
pub use config::{GraphSpec, RunConfig, DEFAULT_NODES};
pub use decode::{decode, decode_state, Solution};
pub use error::{MaxCutError, Result, Stage};
pub use graph::{Edge, Graph, MAX_NODES};
pub use operator::{
    build_cost_operator, build_dense_operator, build_sparse_operator, CostOperator,
    DiagonalOperator, Encoding, PauliTerm, SparsePauliOp,
};
pub use optimizer::{minimize, OptimizationResult, Optimizer, OptimizerConfig, OptimizerType};
pub use pipeline::{run, RunOutcome};
pub use qaoa::QaoaSolver;
pub use sampler::{sample_counts, SampleCounts};
pub use solver::{BestMeasurement, ExactEigensolver, MinimumEigensolver, SolverConfig, SolverResult};
pub use state::StateVector;
