//! Error types for the Max-Cut pipeline
//!
//! Covers:
//! - Graph validation (bad endpoints, self-loops, oversized instances)
//! - Decoding (state index outside the bit width)
//! - Solver failures (budget exhausted, numerical breakdown)
//! - Configuration loading

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Max-Cut operations
pub type Result<T> = std::result::Result<T, MaxCutError>;

/// Pipeline stage, attached to errors surfaced by [`crate::pipeline::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Graph,
    Operator,
    Solve,
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Graph => "graph",
            Stage::Operator => "operator",
            Stage::Solve => "solve",
            Stage::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Error type for graph encoding, solving and decoding
#[derive(Error, Debug)]
pub enum MaxCutError {
    // ==========================================================================
    // Graph Errors
    // ==========================================================================
    /// Edge references a missing node, loops on itself, or has a bad weight
    #[error("Invalid graph: {reason}")]
    InvalidGraph { reason: String },

    /// Too many nodes for a 2^n state space
    #[error("Graph has {nodes} nodes, limit is {limit}")]
    GraphTooLarge { nodes: usize, limit: usize },

    // ==========================================================================
    // Decode Errors
    // ==========================================================================
    /// State index does not fit in the node count
    ///
    /// `i128` holds any `i64` or `u64` index unchanged.
    #[error("State index {index} is out of range for {num_nodes} nodes")]
    OutOfRange { index: i128, num_nodes: usize },

    // ==========================================================================
    // Solver Errors
    // ==========================================================================
    /// Iteration budget exhausted before the objective stabilised
    #[error(
        "Solver did not converge after {iterations} iterations \
         (best objective {best_objective:.6})"
    )]
    SolverDidNotConverge {
        iterations: usize,
        best_objective: f64,
    },

    /// Any other solver breakdown
    #[error("Solver failed: {0}")]
    SolverFailed(String),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Malformed or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be read
    #[error("Cannot read config file `{path}`: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==========================================================================
    // Pipeline
    // ==========================================================================
    /// Error tagged with the stage that produced it
    #[error("{stage} stage failed")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<MaxCutError>,
    },
}

impl MaxCutError {
    /// Shorthand for [`MaxCutError::InvalidGraph`]
    pub fn invalid_graph(reason: impl Into<String>) -> Self {
        MaxCutError::InvalidGraph {
            reason: reason.into(),
        }
    }

    /// Tag this error with a pipeline stage
    pub fn at(self, stage: Stage) -> Self {
        MaxCutError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Stage the error was raised in, if tagged
    pub fn stage(&self) -> Option<Stage> {
        match self {
            MaxCutError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Innermost error, with stage tags stripped
    pub fn root(&self) -> &MaxCutError {
        match self {
            MaxCutError::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the error came from the eigensolver
    pub fn is_solver_error(&self) -> bool {
        matches!(
            self.root(),
            MaxCutError::SolverDidNotConverge { .. } | MaxCutError::SolverFailed(_)
        )
    }
}
