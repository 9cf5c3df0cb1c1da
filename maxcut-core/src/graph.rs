//! Graph Model
//!
//! Weighted undirected graphs for Max-Cut: given G=(V,E), find a partition of
//! the vertices into two sets maximizing the total weight of edges between
//! the sets.
//!
//! For labels x_i ∈ {0, 1} the objective is
//! C(x) = Σ_{(i,j)∈E} w_ij [x_i ≠ x_j]
//!
//! # Example
//!
//! ```
//! use maxcut_core::graph::Graph;
//!
//! let graph = Graph::reference();
//! assert_eq!(graph.num_nodes(), 4);
//! assert_eq!(graph.cut_value(&[0, 1, 0, 1]), 4.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MaxCutError, Result};

/// Largest node count the dense 2^n encodings accept
pub const MAX_NODES: usize = 20;

// =============================================================================
// Edge
// =============================================================================

/// Undirected weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint
    pub u: usize,
    /// Second endpoint
    pub v: usize,
    /// Edge weight (default 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Edge {
    /// Create unweighted edge
    pub fn new(u: usize, v: usize) -> Self {
        Self { u, v, weight: 1.0 }
    }

    /// Create weighted edge
    pub fn weighted(u: usize, v: usize, weight: f64) -> Self {
        Self { u, v, weight }
    }

    /// Whether the endpoints carry different labels
    #[inline]
    pub fn is_cut(&self, labels: &[u8]) -> bool {
        labels[self.u] != labels[self.v]
    }

    /// Whether the endpoints differ in the bit pattern of a state index
    #[inline]
    pub fn is_cut_by_state(&self, state: usize) -> bool {
        ((state >> self.u) & 1) != ((state >> self.v) & 1)
    }
}

// =============================================================================
// Graph
// =============================================================================

/// Undirected graph on nodes `0..num_nodes`
///
/// Construction does not validate edges; [`Graph::validate`] does, and the
/// operator builders call it before encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    num_nodes: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create empty graph with n nodes
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
        }
    }

    /// Create graph from edge list
    pub fn from_edges(num_nodes: usize, edges: Vec<Edge>) -> Self {
        Self { num_nodes, edges }
    }

    /// Add an unweighted edge
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.edges.push(Edge::new(u, v));
    }

    /// Add a weighted edge
    pub fn add_weighted_edge(&mut self, u: usize, v: usize, weight: f64) {
        self.edges.push(Edge::weighted(u, v, weight));
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total weight of all edges
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Check endpoints, self-loops, weights and size
    pub fn validate(&self) -> Result<()> {
        if self.num_nodes > MAX_NODES {
            return Err(MaxCutError::GraphTooLarge {
                nodes: self.num_nodes,
                limit: MAX_NODES,
            });
        }

        for edge in &self.edges {
            if edge.u >= self.num_nodes || edge.v >= self.num_nodes {
                return Err(MaxCutError::invalid_graph(format!(
                    "edge ({}, {}) references a node outside [0, {})",
                    edge.u, edge.v, self.num_nodes
                )));
            }
            if edge.u == edge.v {
                return Err(MaxCutError::invalid_graph(format!(
                    "self-loop on node {}",
                    edge.u
                )));
            }
            if !edge.weight.is_finite() {
                return Err(MaxCutError::invalid_graph(format!(
                    "edge ({}, {}) has non-finite weight {}",
                    edge.u, edge.v, edge.weight
                )));
            }
        }

        Ok(())
    }

    /// Total weight of edges whose endpoints carry different labels
    pub fn cut_value(&self, labels: &[u8]) -> f64 {
        self.edges
            .iter()
            .filter(|e| e.is_cut(labels))
            .map(|e| e.weight)
            .sum()
    }

    /// Cut weight of the partition encoded by a state index (bit i = node i)
    pub fn cut_value_of_state(&self, state: usize) -> f64 {
        self.edges
            .iter()
            .filter(|e| e.is_cut_by_state(state))
            .map(|e| e.weight)
            .sum()
    }

    /// Optimal cut by exhaustive search; returns (state, cut weight)
    ///
    /// Ties keep the lowest state index.
    pub fn brute_force_max_cut(&self) -> Result<(usize, f64)> {
        self.validate()?;

        let mut best_state = 0;
        let mut best_cut = f64::NEG_INFINITY;

        for state in 0..(1usize << self.num_nodes) {
            let cut = self.cut_value_of_state(state);
            if cut > best_cut {
                best_cut = cut;
                best_state = state;
            }
        }

        Ok((best_state, best_cut))
    }

    // =========================================================================
    // Standard Graph Constructors
    // =========================================================================

    /// The 4-node instance: square 0-1-2-3 plus the chord (1, 3)
    pub fn reference() -> Self {
        Self::ring_with_chord(4)
    }

    /// Ring over n nodes plus the chord (1, n-1)
    ///
    /// The chord is only added when it is not already a ring edge (n >= 4),
    /// so `ring_with_chord(4)` is the reference instance.
    pub fn ring_with_chord(n: usize) -> Self {
        let mut graph = Self::cycle(n);
        if n >= 4 {
            graph.add_edge(1, n - 1);
        }
        graph
    }

    /// Triangle graph (3 nodes, 3 edges)
    pub fn triangle() -> Self {
        Self::cycle(3)
    }

    /// Complete graph K_n
    pub fn complete(n: usize) -> Self {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push(Edge::new(i, j));
            }
        }
        Self::from_edges(n, edges)
    }

    /// Path graph P_n (n nodes, n-1 edges)
    pub fn path(n: usize) -> Self {
        let edges = (1..n).map(|i| Edge::new(i - 1, i)).collect();
        Self::from_edges(n, edges)
    }

    /// Cycle graph C_n; degenerates to a path for n < 3
    pub fn cycle(n: usize) -> Self {
        let mut graph = Self::path(n);
        if n >= 3 {
            graph.add_edge(n - 1, 0);
        }
        graph
    }

    /// Star graph S_n (node 0 connected to n-1 leaves)
    pub fn star(n: usize) -> Self {
        let edges = (1..n).map(|i| Edge::new(0, i)).collect();
        Self::from_edges(n, edges)
    }
}

// =============================================================================
// Tests
// =============================================================================
