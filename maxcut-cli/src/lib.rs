//! Max-Cut CLI
//!
//! Solves a weighted Max-Cut instance with QAOA (or the exact solver),
//! prints the cut and the partition, and renders the colored graph.
//!
//! # Usage
//!
//! ```bash
//! # Reference 4-node graph
//! maxcut
//!
//! # Ring of 6 nodes with a chord, dense encoding
//! maxcut --nodes 6 --encoding dense
//!
//! # Explicit weighted edges, exact solver, JSON report
//! maxcut --edge 0-1:2.5 --edge 1-2 --edge 2-0 --solver exact --json report.json
//!
//! # p = 1 parameter grid instead of an optimizer
//! maxcut --solver grid --grid-points 24 --reps 1
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use maxcut_core::qaoa::DEFAULT_GRID_POINTS;
use maxcut_core::{
    Edge, Encoding, ExactEigensolver, GraphSpec, MinimumEigensolver, OptimizerType, QaoaSolver,
    RunConfig,
};

pub mod layout;
pub mod render;
pub mod report;

/// Default image path
pub const DEFAULT_OUTPUT: &str = "maxcut_solution.png";

/// Max-Cut solver command line
#[derive(Parser, Debug)]
#[command(name = "maxcut")]
#[command(author, version, about = "Solve weighted Max-Cut with QAOA and render the partition")]
pub struct Cli {
    /// Nodes in the ring-with-chord graph (4 = reference instance)
    #[arg(short, long)]
    pub nodes: Option<usize>,

    /// Explicit edge `u-v` or `u-v:weight`; repeatable, replaces the ring
    #[arg(short, long = "edge", value_parser = parse_edge)]
    pub edges: Vec<Edge>,

    /// TOML run configuration; explicit flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Cost operator encoding
    #[arg(long, value_enum)]
    pub encoding: Option<EncodingArg>,

    /// Eigensolver implementation
    #[arg(short, long, value_enum, default_value = "qaoa")]
    pub solver: SolverKind,

    /// Grid points per parameter for `--solver grid`
    #[arg(long, default_value_t = DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    /// Number of QAOA layers
    #[arg(long)]
    pub reps: Option<usize>,

    /// Optimizer iteration budget
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Classical optimizer
    #[arg(long, value_enum)]
    pub optimizer: Option<OptimizerArg>,

    /// Measurement shots
    #[arg(long)]
    pub shots: Option<usize>,

    /// Random seed for parameters, sampling and layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report the best parameters found even if the optimizer did not converge
    #[arg(long)]
    pub allow_unconverged: bool,

    /// Output image path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also write a JSON report to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Encoding argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingArg {
    Sparse,
    Dense,
}

impl From<EncodingArg> for Encoding {
    fn from(val: EncodingArg) -> Self {
        match val {
            EncodingArg::Sparse => Encoding::Sparse,
            EncodingArg::Dense => Encoding::Dense,
        }
    }
}

/// Solver argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverKind {
    /// Variational state-vector QAOA
    Qaoa,
    /// QAOA with a uniform parameter grid instead of an optimizer
    Grid,
    /// Exhaustive diagonal scan
    Exact,
}

/// Optimizer argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizerArg {
    Adam,
    Momentum,
    Sgd,
    Spsa,
}

impl From<OptimizerArg> for OptimizerType {
    fn from(val: OptimizerArg) -> Self {
        match val {
            OptimizerArg::Adam => OptimizerType::Adam,
            OptimizerArg::Momentum => OptimizerType::Momentum,
            OptimizerArg::Sgd => OptimizerType::SGD,
            OptimizerArg::Spsa => OptimizerType::SPSA,
        }
    }
}

/// Parse `u-v` or `u-v:weight`
pub fn parse_edge(s: &str) -> std::result::Result<Edge, String> {
    let (pair, weight) = match s.split_once(':') {
        Some((pair, w)) => {
            let w: f64 = w
                .trim()
                .parse()
                .map_err(|_| format!("invalid weight '{w}' in edge '{s}'"))?;
            (pair, w)
        }
        None => (s, 1.0),
    };

    let (u, v) = pair
        .split_once('-')
        .ok_or_else(|| format!("edge '{s}' must look like u-v or u-v:weight"))?;
    let u: usize = u
        .trim()
        .parse()
        .map_err(|_| format!("invalid node '{u}' in edge '{s}'"))?;
    let v: usize = v
        .trim()
        .parse()
        .map_err(|_| format!("invalid node '{v}' in edge '{s}'"))?;

    Ok(Edge::weighted(u, v, weight))
}

impl Cli {
    /// Resolve the run configuration: config file, then explicit flags
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if !self.edges.is_empty() {
            let max_endpoint = self
                .edges
                .iter()
                .map(|e| e.u.max(e.v) + 1)
                .max()
                .unwrap_or(0);
            config.graph = GraphSpec::Edges {
                nodes: self.nodes.unwrap_or(0).max(max_endpoint),
                edges: self.edges.clone(),
            };
        } else if let Some(nodes) = self.nodes {
            config.graph = GraphSpec::RingWithChord { nodes };
        }

        if let Some(encoding) = self.encoding {
            config.encoding = encoding.into();
        }

        let solver = &mut config.solver;
        if let Some(reps) = self.reps {
            solver.reps = reps;
        }
        if let Some(max_iter) = self.max_iter {
            solver.max_iter = max_iter;
        }
        if let Some(optimizer) = self.optimizer {
            solver.optimizer = optimizer.into();
        }
        if let Some(shots) = self.shots {
            solver.shots = shots;
        }
        if let Some(seed) = self.seed {
            solver.seed = seed;
        }
        if self.allow_unconverged {
            solver.strict_convergence = false;
        }

        Ok(config)
    }

    /// The eigensolver selected by `--solver`
    pub fn eigensolver(&self) -> Box<dyn MinimumEigensolver> {
        match self.solver {
            SolverKind::Qaoa => Box::new(QaoaSolver::new()),
            SolverKind::Grid => Box::new(QaoaSolver::grid(self.grid_points)),
            SolverKind::Exact => Box::new(ExactEigensolver),
        }
    }
}
