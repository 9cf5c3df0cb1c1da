//! Properties of the cost operator builders and the decoder
//!
//! Validates, over random weighted graphs:
//! - Dense diagonal entries equal cut weights
//! - Sparse terms carry Z on the edge endpoints with coefficient w/2
//! - Both encodings assign the same cut weight to every state
//! - Decoding is the inverse of bit packing

use std::collections::BTreeSet;

use maxcut_core::{
    build_cost_operator, build_dense_operator, build_sparse_operator, decode, CostOperator, Edge,
    Encoding, Graph, MaxCutError,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

/// Graphs on 2..=7 nodes with distinct, non-loop, positively weighted edges
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (2usize..=7).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0.1f64..5.0), 0..12).prop_map(move |raw| {
            let mut seen = BTreeSet::new();
            let edges = raw
                .into_iter()
                .filter(|&(u, v, _)| u != v && seen.insert((u.min(v), u.max(v))))
                .map(|(u, v, w)| Edge::weighted(u, v, w))
                .collect();
            Graph::from_edges(n, edges)
        })
    })
}

proptest! {
    #[test]
    fn prop_dense_entry_is_cut_weight(graph in graph_strategy()) {
        let op = build_dense_operator(&graph).unwrap();

        for (k, &entry) in op.diagonal().iter().enumerate() {
            let expected: f64 = graph
                .edges()
                .iter()
                .filter(|e| ((k >> e.u) & 1) != ((k >> e.v) & 1))
                .map(|e| e.weight)
                .sum();
            prop_assert!((entry - expected).abs() < EPSILON, "state {}", k);
        }
    }

    #[test]
    fn prop_sparse_terms_match_edges(graph in graph_strategy()) {
        let op = build_sparse_operator(&graph).unwrap();
        prop_assert_eq!(op.terms().len(), graph.num_edges());

        for (term, edge) in op.terms().iter().zip(graph.edges()) {
            prop_assert_eq!(term.label.len(), graph.num_nodes());
            prop_assert!((term.coeff - edge.weight / 2.0).abs() < EPSILON);

            let z: Vec<usize> = term.z_positions().collect();
            prop_assert_eq!(z, vec![edge.u.min(edge.v), edge.u.max(edge.v)]);
        }
    }

    #[test]
    fn prop_encodings_agree_on_cut(graph in graph_strategy()) {
        let sparse = build_cost_operator(&graph, Encoding::Sparse).unwrap();
        let dense = build_cost_operator(&graph, Encoding::Dense).unwrap();

        let ds = sparse.minimization_diagonal();
        let dd = dense.minimization_diagonal();
        for k in 0..ds.len() {
            let cut = graph.cut_value_of_state(k);
            prop_assert!((sparse.cut_value(ds[k]) - cut).abs() < EPSILON);
            prop_assert!((dense.cut_value(dd[k]) - cut).abs() < EPSILON);
        }
    }

    #[test]
    fn prop_builders_are_deterministic(graph in graph_strategy()) {
        let a = build_cost_operator(&graph, Encoding::Sparse).unwrap();
        let b = build_cost_operator(&graph, Encoding::Sparse).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_decode_inverts_packing(n in 0usize..=20, raw in any::<u32>()) {
        let index = i64::from(raw) % (1i64 << n);
        let solution = decode(index, n).unwrap();

        prop_assert_eq!(solution.num_nodes(), n);
        prop_assert_eq!(solution.to_index(), index as u64);
        for i in 0..n {
            prop_assert_eq!(i64::from(solution.label(i)), (index >> i) & 1);
        }
    }

    #[test]
    fn prop_decode_rejects_out_of_range(
        n in 0usize..=20,
        excess in 0i64..1000,
        negative in 1i64..1000,
    ) {
        let too_big = (1i64 << n) + excess;
        let is_out_of_range = |r: Result<_, MaxCutError>| {
            matches!(r, Err(MaxCutError::OutOfRange { .. }))
        };
        prop_assert!(is_out_of_range(decode(too_big, n)));
        prop_assert!(is_out_of_range(decode(-negative, n)));
    }
}

// =============================================================================
// Fixed Instances
// =============================================================================

#[test]
fn test_reference_sparse_operator() {
    let op = build_sparse_operator(&Graph::reference()).unwrap();
    let labels: Vec<&str> = op.terms().iter().map(|t| t.label.as_str()).collect();

    assert_eq!(labels, vec!["ZZII", "IZZI", "IIZZ", "ZIIZ", "IZIZ"]);
    assert!(op.terms().iter().all(|t| (t.coeff - 0.5).abs() < EPSILON));
    assert!((op.constant_offset() - 2.5).abs() < EPSILON);
}

#[test]
fn test_reference_dense_operator() {
    let op = build_dense_operator(&Graph::reference()).unwrap();

    assert_eq!(op.diagonal().len(), 16);
    assert_eq!(op.cut_weight(0b1010), 4.0);
    assert_eq!(op.cut_weight(0b0101), 4.0);
    assert_eq!(op.cut_weight(0), 0.0);
    assert_eq!(op.cut_weight(0b0001), 2.0);
}

#[test]
fn test_weighted_edge_coefficient() {
    let graph = Graph::from_edges(3, vec![Edge::weighted(0, 2, 3.0)]);
    let op = build_sparse_operator(&graph).unwrap();
    assert_eq!(op.coefficient("ZIZ"), Some(1.5));

    let dense = build_dense_operator(&graph).unwrap();
    assert_eq!(dense.cut_weight(0b001), 3.0);
    assert_eq!(dense.cut_weight(0b101), 0.0);
}

#[test]
fn test_invalid_graphs_rejected() {
    let out_of_range = Graph::from_edges(4, vec![Edge::new(0, 5)]);
    let self_loop = Graph::from_edges(4, vec![Edge::new(2, 2)]);

    for graph in [out_of_range, self_loop] {
        for encoding in [Encoding::Sparse, Encoding::Dense] {
            assert!(matches!(
                build_cost_operator(&graph, encoding),
                Err(MaxCutError::InvalidGraph { .. })
            ));
        }
    }

    assert!(matches!(
        build_cost_operator(&Graph::cycle(21), Encoding::Dense),
        Err(MaxCutError::GraphTooLarge { nodes: 21, limit: 20 })
    ));
}

#[test]
fn test_empty_graph_operators() {
    let graph = Graph::new(3);
    let sparse = build_cost_operator(&graph, Encoding::Sparse).unwrap();

    match &sparse {
        CostOperator::Sparse(op) => {
            assert!(op.terms().is_empty());
            assert_eq!(op.to_string(), "0");
        }
        CostOperator::Dense(_) => panic!("expected sparse operator"),
    }
    assert!(sparse.minimization_diagonal().iter().all(|&e| e == 0.0));
}
