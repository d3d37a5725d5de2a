//! Unit tests for the analytics engine.

use super::*;
use crate::test_utils::{cycle_matrix, matrix_from_edges, path_matrix};

use rstest::rstest;

const EPSILON: f64 = 1e-12;

fn assert_scores(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "score count");
    for (node, (got, want)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (got - want).abs() < EPSILON,
            "node {node}: expected {want}, got {got}"
        );
    }
}

#[test]
fn three_part_chain_scenario() {
    let matrix = matrix_from_edges(3, &[(0, 1), (1, 2)]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);

    assert_scores(result.degree(), &[0.5, 1.0, 0.5]);
    assert_scores(result.betweenness(), &[0.0, 1.0, 0.0]);
    assert_scores(result.closeness(), &[2.0 / 3.0, 1.0, 2.0 / 3.0]);
    assert_eq!(result.bridges(), [Edge::new(0, 1), Edge::new(1, 2)]);
    assert_eq!(result.components(), [vec![0, 1, 2]]);
    assert!(result.isolated().is_empty());
    assert!(result.is_connected());
}

#[test]
fn single_node_is_its_own_component() {
    let matrix = matrix_from_edges(1, &[]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);

    assert_scores(result.degree(), &[0.0]);
    assert_scores(result.betweenness(), &[0.0]);
    assert_scores(result.closeness(), &[0.0]);
    assert!(result.bridges().is_empty());
    assert_eq!(result.components(), [vec![0]]);
    assert_eq!(result.isolated(), [0]);
}

#[test]
fn edgeless_graph_is_all_singletons() {
    let matrix = matrix_from_edges(4, &[]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);

    assert_scores(result.degree(), &[0.0; 4]);
    assert_scores(result.betweenness(), &[0.0; 4]);
    assert_scores(result.closeness(), &[0.0; 4]);
    assert!(result.bridges().is_empty());
    assert_eq!(result.components(), [vec![0], vec![1], vec![2], vec![3]]);
    assert_eq!(result.isolated(), [0, 1, 2, 3]);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(40)]
fn path_has_one_bridge_per_edge(#[case] nodes: usize) {
    let matrix = path_matrix(nodes);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    assert_eq!(result.bridges().len(), nodes - 1);
    assert_eq!(result.bridges(), graph.edges());
}

#[rstest]
#[case(3)]
#[case(4)]
#[case(9)]
fn cycle_has_no_bridges(#[case] nodes: usize) {
    let matrix = cycle_matrix(nodes);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    assert!(result.bridges().is_empty());
    assert_eq!(result.components().len(), 1);
}

#[test]
fn long_path_does_not_recurse() {
    let matrix = path_matrix(2_000);
    let graph = ContactGraph::from_matrix(&matrix);
    let bridges = StandardAlgorithms.bridges(&graph);
    assert_eq!(bridges.len(), 1_999);
}

#[test]
fn isolated_row_is_singleton_and_zero_degree() {
    // 0-1-2 triangle plus an untouched part 3 and a pendant 4 on 2.
    let matrix = matrix_from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 4)]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);

    assert_eq!(result.degree()[3], 0.0);
    assert_eq!(result.isolated(), [3]);
    assert_eq!(result.components(), [vec![0, 1, 2, 4], vec![3]]);
    assert_eq!(result.component_of(3), Some(&[3][..]));
    assert_eq!(result.bridges(), [Edge::new(2, 4)]);
    assert!(!result.is_connected());
}

#[test]
fn closeness_ignores_unreachable_nodes() {
    // Two disjoint edges: each node reaches exactly one other at distance 1.
    let matrix = matrix_from_edges(4, &[(0, 1), (2, 3)]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    assert_scores(result.closeness(), &[1.0; 4]);
}

#[test]
fn closeness_normalises_by_reachable_parts_only() {
    // Path 0-1-2 and an untouched part 3.
    let matrix = matrix_from_edges(4, &[(0, 1), (1, 2)]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    assert_scores(result.closeness(), &[2.0 / 3.0, 1.0, 2.0 / 3.0, 0.0]);
}

#[test]
fn star_centre_carries_all_betweenness() {
    let matrix = matrix_from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    assert_scores(result.betweenness(), &[1.0, 0.0, 0.0, 0.0, 0.0]);
    assert_scores(result.degree(), &[1.0, 0.25, 0.25, 0.25, 0.25]);
}

#[test]
fn square_splits_betweenness_between_paths() {
    // Cycle 0-1-2-3: each opposite pair has two shortest paths.
    let matrix = cycle_matrix(4);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    // Each node lies on half the paths of one opposite pair: 0.5 / 3.
    assert_scores(result.betweenness(), &[1.0 / 6.0; 4]);
}

#[test]
fn centrality_bundles_scores() {
    let matrix = path_matrix(3);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze(&graph);
    let middle = result.centrality(1).expect("node exists");
    assert!((middle.degree - 1.0).abs() < EPSILON);
    assert!((middle.betweenness - 1.0).abs() < EPSILON);
    assert!((middle.closeness - 1.0).abs() < EPSILON);
    assert_eq!(result.centrality(3), None);
}

struct NoBridges;

impl GraphAlgorithms for NoBridges {
    fn degree_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64> {
        StandardAlgorithms.degree_centrality(graph)
    }

    fn betweenness_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64> {
        vec![0.0; graph.node_count()]
    }

    fn closeness_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64> {
        vec![0.0; graph.node_count()]
    }

    fn bridges(&self, _graph: &ContactGraph<'_>) -> Vec<Edge> {
        Vec::new()
    }

    fn connected_components(&self, graph: &ContactGraph<'_>) -> Vec<Vec<usize>> {
        StandardAlgorithms.connected_components(graph)
    }
}

#[test]
fn analyze_with_uses_substituted_algorithms() {
    let matrix = path_matrix(3);
    let graph = ContactGraph::from_matrix(&matrix);
    let result = analyze_with(&graph, &NoBridges);
    assert!(result.bridges().is_empty());
    assert_scores(result.degree(), &[0.5, 1.0, 0.5]);
    let dynamic: &dyn GraphAlgorithms = &StandardAlgorithms;
    assert_eq!(analyze_with(&graph, dynamic).bridges().len(), 2);
}
