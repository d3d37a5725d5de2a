//! Structural analysis of contact graphs.
//!
//! The [`GraphAlgorithms`] trait is the seam for substituting graph
//! implementations; [`StandardAlgorithms`] is the built-in one. All
//! computations are pure functions of a [`ContactGraph`].

mod bridges;
mod centrality;
mod components;

use tracing::{info, instrument};

use crate::graph::{ContactGraph, Edge};

/// The graph algorithms used by [`analyze_with`].
pub trait GraphAlgorithms {
    /// Degree centrality per node.
    fn degree_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64>;

    /// Normalised betweenness centrality per node.
    fn betweenness_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64>;

    /// Closeness centrality per node over reachable nodes only.
    fn closeness_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64>;

    /// Bridges as canonical edges in ascending order.
    fn bridges(&self, graph: &ContactGraph<'_>) -> Vec<Edge>;

    /// Connected components, each sorted, ordered by smallest member.
    fn connected_components(&self, graph: &ContactGraph<'_>) -> Vec<Vec<usize>>;
}

/// Built-in algorithms: degree counting, Brandes betweenness, breadth-first
/// closeness, iterative Tarjan bridges and union-find components.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardAlgorithms;

impl GraphAlgorithms for StandardAlgorithms {
    fn degree_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64> {
        centrality::degree_centrality(graph)
    }

    fn betweenness_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64> {
        centrality::betweenness_centrality(graph)
    }

    fn closeness_centrality(&self, graph: &ContactGraph<'_>) -> Vec<f64> {
        centrality::closeness_centrality(graph)
    }

    fn bridges(&self, graph: &ContactGraph<'_>) -> Vec<Edge> {
        bridges::bridges(graph)
    }

    fn connected_components(&self, graph: &ContactGraph<'_>) -> Vec<Vec<usize>> {
        components::connected_components(graph)
    }
}

/// Centrality scores of one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centrality {
    /// Share of other nodes adjacent to this one.
    pub degree: f64,
    /// Normalised share of shortest paths through this node.
    pub betweenness: f64,
    /// Inverse mean hop distance to reachable nodes.
    pub closeness: f64,
}

/// Result of [`analyze`]: per-node centralities and structural features.
///
/// # Examples
/// ```
/// use tessera_core::{ContactGraph, ContactMatrix, Edge, analyze};
///
/// let matrix = ContactMatrix::try_new(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]],
/// )?;
/// let graph = ContactGraph::from_matrix(&matrix);
/// let result = analyze(&graph);
/// assert_eq!(result.degree(), [0.5, 1.0, 0.5]);
/// assert_eq!(result.bridges(), [Edge::new(0, 1), Edge::new(1, 2)]);
/// assert_eq!(result.components(), [vec![0, 1, 2]]);
/// assert!(result.isolated().is_empty());
/// # Ok::<(), tessera_core::ValidationError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    degree: Vec<f64>,
    betweenness: Vec<f64>,
    closeness: Vec<f64>,
    bridges: Vec<Edge>,
    components: Vec<Vec<usize>>,
    isolated: Vec<usize>,
}

impl AnalysisResult {
    /// Degree centrality indexed by node.
    #[rustfmt::skip]
    #[must_use]
    pub fn degree(&self) -> &[f64] { &self.degree }

    /// Betweenness centrality indexed by node.
    #[rustfmt::skip]
    #[must_use]
    pub fn betweenness(&self) -> &[f64] { &self.betweenness }

    /// Closeness centrality indexed by node.
    #[rustfmt::skip]
    #[must_use]
    pub fn closeness(&self) -> &[f64] { &self.closeness }

    /// Bridges in ascending order.
    #[rustfmt::skip]
    #[must_use]
    pub fn bridges(&self) -> &[Edge] { &self.bridges }

    /// Connected components ordered by smallest member.
    #[rustfmt::skip]
    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] { &self.components }

    /// Nodes without any contact, ascending.
    #[rustfmt::skip]
    #[must_use]
    pub fn isolated(&self) -> &[usize] { &self.isolated }

    /// Returns all centrality scores of `node`.
    #[must_use]
    pub fn centrality(&self, node: usize) -> Option<Centrality> {
        Some(Centrality {
            degree: *self.degree.get(node)?,
            betweenness: *self.betweenness.get(node)?,
            closeness: *self.closeness.get(node)?,
        })
    }

    /// Returns the component containing `node`.
    #[must_use]
    pub fn component_of(&self, node: usize) -> Option<&[usize]> {
        self.components
            .iter()
            .find(|component| component.binary_search(&node).is_ok())
            .map(Vec::as_slice)
    }

    /// Returns whether the graph is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }
}

/// Analyses a graph with [`StandardAlgorithms`].
#[must_use]
pub fn analyze(graph: &ContactGraph<'_>) -> AnalysisResult {
    analyze_with(graph, &StandardAlgorithms)
}

/// Analyses a graph with the given algorithms.
///
/// Isolated nodes are read from the graph directly, so they are always the
/// nodes of degree zero.
#[must_use]
#[instrument(
    name = "core.analyze",
    skip(graph, algorithms),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn analyze_with<A>(graph: &ContactGraph<'_>, algorithms: &A) -> AnalysisResult
where
    A: GraphAlgorithms + ?Sized,
{
    let result = AnalysisResult {
        degree: algorithms.degree_centrality(graph),
        betweenness: algorithms.betweenness_centrality(graph),
        closeness: algorithms.closeness_centrality(graph),
        bridges: algorithms.bridges(graph),
        components: algorithms.connected_components(graph),
        isolated: (0..graph.node_count())
            .filter(|node| graph.degree(*node) == 0)
            .collect(),
    };
    info!(
        bridges = result.bridges.len(),
        components = result.components.len(),
        isolated = result.isolated.len(),
        "graph analysed"
    );
    result
}

#[cfg(test)]
mod tests;
