//! Run configuration
//!
//! [`RunConfig`] bundles everything one pipeline run needs: which graph, which
//! operator encoding and how to configure the solver. It deserialises from
//! TOML; missing sections fall back to their defaults.
//!
//! ```toml
//! encoding = "dense"
//!
//! [graph]
//! kind = "edges"
//! nodes = 3
//! edges = [{ u = 0, v = 1 }, { u = 1, v = 2, weight = 2.5 }]
//!
//! [solver]
//! reps = 1
//! optimizer = "spsa"
//! strict_convergence = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MaxCutError, Result};
use crate::graph::{Edge, Graph, MAX_NODES};
use crate::operator::Encoding;
use crate::solver::SolverConfig;

/// Node count of the default ring-with-chord graph
pub const DEFAULT_NODES: usize = 4;

// =============================================================================
// Graph Specification
// =============================================================================

/// Which graph to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphSpec {
    /// The 4-node reference instance
    Reference,
    /// Ring over `nodes` plus the chord (1, nodes-1)
    RingWithChord { nodes: usize },
    /// Complete graph K_n
    Complete { nodes: usize },
    /// Cycle C_n
    Cycle { nodes: usize },
    /// Path P_n
    Path { nodes: usize },
    /// Star with node 0 at the centre
    Star { nodes: usize },
    /// Explicit edge list
    Edges { nodes: usize, edges: Vec<Edge> },
}

impl Default for GraphSpec {
    fn default() -> Self {
        GraphSpec::RingWithChord {
            nodes: DEFAULT_NODES,
        }
    }
}

impl GraphSpec {
    /// Declared node count
    pub fn num_nodes(&self) -> usize {
        match self {
            GraphSpec::Reference => 4,
            GraphSpec::RingWithChord { nodes }
            | GraphSpec::Complete { nodes }
            | GraphSpec::Cycle { nodes }
            | GraphSpec::Path { nodes }
            | GraphSpec::Star { nodes }
            | GraphSpec::Edges { nodes, .. } => *nodes,
        }
    }

    /// Construct the graph; edges are validated later by the operator builder
    pub fn build(&self) -> Graph {
        match self {
            GraphSpec::Reference => Graph::reference(),
            GraphSpec::RingWithChord { nodes } => Graph::ring_with_chord(*nodes),
            GraphSpec::Complete { nodes } => Graph::complete(*nodes),
            GraphSpec::Cycle { nodes } => Graph::cycle(*nodes),
            GraphSpec::Path { nodes } => Graph::path(*nodes),
            GraphSpec::Star { nodes } => Graph::star(*nodes),
            GraphSpec::Edges { nodes, edges } => Graph::from_edges(*nodes, edges.clone()),
        }
    }
}

// =============================================================================
// Run Configuration
// =============================================================================

/// Complete configuration of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub graph: GraphSpec,
    pub encoding: Encoding,
    pub solver: SolverConfig,
}

impl RunConfig {
    /// Config for a given graph with default encoding and solver
    pub fn for_graph(graph: GraphSpec) -> Self {
        Self {
            graph,
            ..Default::default()
        }
    }

    /// Set operator encoding
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set solver configuration
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`MaxCutError::Config`] if the TOML is malformed or names
    /// unknown fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MaxCutError::Config(e.to_string()))
    }

    /// Load from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`MaxCutError::ConfigRead`] if the file cannot be read and
    /// [`MaxCutError::Config`] if its contents do not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| MaxCutError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Serialise to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| MaxCutError::Config(e.to_string()))
    }

    /// Check the declared graph size
    ///
    /// Edge endpoints are left to the operator builder so that a bad edge
    /// surfaces as an operator-stage error.
    pub fn validate_graph(&self) -> Result<()> {
        let nodes = self.graph.num_nodes();
        if nodes > MAX_NODES {
            return Err(MaxCutError::GraphTooLarge {
                nodes,
                limit: MAX_NODES,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::OptimizerType;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.graph, GraphSpec::RingWithChord { nodes: 4 });
        assert_eq!(config.encoding, Encoding::Sparse);
        assert!(config.validate_graph().is_ok());
        assert!(config.solver.validate().is_ok());
        assert_eq!(config.graph.build(), Graph::reference());
    }

    #[test]
    fn test_parse_edges_config() {
        let text = r#"
            encoding = "dense"

            [graph]
            kind = "edges"
            nodes = 3
            edges = [{ u = 0, v = 1 }, { u = 1, v = 2, weight = 2.5 }]

            [solver]
            reps = 1
            optimizer = "spsa"
            strict_convergence = false
        "#;
        let config = RunConfig::from_toml_str(text).unwrap();

        assert_eq!(config.encoding, Encoding::Dense);
        assert_eq!(config.solver.reps, 1);
        assert_eq!(config.solver.optimizer, OptimizerType::SPSA);
        assert!(!config.solver.strict_convergence);
        // Unspecified solver fields keep their defaults
        assert_eq!(config.solver.shots, 1024);

        let graph = config.graph.build();
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.edges()[0].weight, 1.0);
        assert_eq!(graph.edges()[1].weight, 2.5);
    }

    #[test]
    fn test_parse_named_graph() {
        let config = RunConfig::from_toml_str("[graph]\nkind = \"complete\"\nnodes = 5\n").unwrap();
        assert_eq!(config.graph.build().num_edges(), 10);

        let config = RunConfig::from_toml_str("[graph]\nkind = \"reference\"\n").unwrap();
        assert_eq!(config.graph.num_nodes(), 4);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RunConfig::from_toml_str("[solver]\nlayers = 3\n").unwrap_err();
        assert!(matches!(err, MaxCutError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RunConfig::for_graph(GraphSpec::Cycle { nodes: 5 })
            .with_encoding(Encoding::Dense)
            .with_solver(SolverConfig::default().with_reps(3));

        let text = config.to_toml_string().unwrap();
        assert_eq!(RunConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = RunConfig::from_file(Path::new("/nonexistent/maxcut.toml")).unwrap_err();
        assert!(matches!(err, MaxCutError::ConfigRead { .. }));
    }

    #[test]
    fn test_validate_rejects_oversized_graph() {
        let config = RunConfig::for_graph(GraphSpec::Complete { nodes: MAX_NODES + 1 });
        assert!(matches!(
            config.validate_graph(),
            Err(MaxCutError::GraphTooLarge { .. })
        ));
    }

    #[test]
    fn test_graph_check_ignores_solver_ranges() {
        let config = RunConfig::default().with_solver(SolverConfig::default().with_shots(0));
        assert!(config.validate_graph().is_ok());
        assert!(matches!(config.solver.validate(), Err(MaxCutError::Config(_))));
    }

    #[test]
    fn test_parse_path_and_star() {
        let config = RunConfig::from_toml_str("[graph]\nkind = \"star\"\nnodes = 6\n").unwrap();
        assert_eq!(config.graph, GraphSpec::Star { nodes: 6 });
        assert_eq!(config.graph.build(), Graph::star(6));

        let config = RunConfig::from_toml_str("[graph]\nkind = \"path\"\nnodes = 3\n").unwrap();
        assert_eq!(config.graph.build().num_edges(), 2);
    }
}
