//! Layout selection for rendering contact graphs.
//!
//! The selector is a pure function of node count and edge density; the
//! thresholds live in [`LayoutPolicy`] so callers can tune them.

use std::fmt;

use crate::graph::{ContactGraph, Edge};

/// Identifier of a graph layout algorithm understood by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Spring-embedder layout.
    ForceDirected,
    /// Stress majorisation layout.
    StressMinimizing,
    /// Nodes placed on a circle.
    Circular,
    /// Eigenvector-based layout.
    Spectral,
}

impl Layout {
    /// Returns the stable identifier of the layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForceDirected => "force-directed",
            Self::StressMinimizing => "stress-minimizing",
            Self::Circular => "circular",
            Self::Spectral => "spectral",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds used by [`LayoutPolicy::select`].
///
/// Rules apply in order: small graphs, then dense graphs, then medium and
/// large graphs.
///
/// # Examples
/// ```
/// use tessera_core::{Layout, LayoutPolicy};
///
/// let policy = LayoutPolicy::default();
/// assert_eq!(policy.select(8, 1.0), Layout::ForceDirected);
/// assert_eq!(policy.select(15, 0.7), Layout::Circular);
/// assert_eq!(policy.select(15, 0.2), Layout::StressMinimizing);
/// assert_eq!(policy.select(40, 0.1), Layout::ForceDirected);
/// assert_eq!(policy.select(200, 0.1), Layout::Spectral);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPolicy {
    /// Graphs with at most this many nodes use a force-directed layout.
    pub small_max_nodes: usize,
    /// Graphs at least this dense use a circular layout.
    pub dense_min_density: f64,
    /// Graphs with at most this many nodes use stress minimisation.
    pub medium_max_nodes: usize,
    /// Graphs with at most this many nodes fall back to force-directed.
    pub large_max_nodes: usize,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            small_max_nodes: 10,
            dense_min_density: 0.6,
            medium_max_nodes: 20,
            large_max_nodes: 50,
        }
    }
}

impl LayoutPolicy {
    /// Selects a layout for a graph of `node_count` nodes and the given
    /// edge density.
    #[must_use]
    pub fn select(&self, node_count: usize, edge_density: f64) -> Layout {
        if node_count <= self.small_max_nodes {
            Layout::ForceDirected
        } else if edge_density >= self.dense_min_density {
            Layout::Circular
        } else if node_count <= self.medium_max_nodes {
            Layout::StressMinimizing
        } else if node_count <= self.large_max_nodes {
            Layout::ForceDirected
        } else {
            Layout::Spectral
        }
    }
}

/// Selects a layout with the default [`LayoutPolicy`].
#[must_use]
pub fn select_layout(node_count: usize, edge_density: f64) -> Layout {
    LayoutPolicy::default().select(node_count, edge_density)
}

/// Returns `edges / (n (n - 1) / 2)`, or `0.0` for fewer than two nodes.
///
/// # Examples
/// ```
/// use tessera_core::edge_density;
///
/// assert_eq!(edge_density(1, 0), 0.0);
/// assert_eq!(edge_density(4, 3), 0.5);
/// ```
#[must_use]
pub fn edge_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let possible = node_count * (node_count - 1) / 2;
    edge_count as f64 / possible as f64
}

/// Everything a renderer needs to draw a contact graph.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    /// Node labels in index order.
    pub nodes: Vec<String>,
    /// Edges in row-major order.
    pub edges: Vec<Edge>,
    /// The selected layout.
    pub layout: Layout,
}

impl RenderPlan {
    /// Builds the plan for `graph` using `policy`.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::{ContactGraph, ContactMatrix, Layout, LayoutPolicy, RenderPlan};
    ///
    /// let matrix = ContactMatrix::try_new(
    ///     vec!["A".into(), "B".into()],
    ///     vec![vec![1, 1], vec![1, 1]],
    /// )?;
    /// let plan = RenderPlan::from_graph(&ContactGraph::from_matrix(&matrix), &LayoutPolicy::default());
    /// assert_eq!(plan.nodes, ["A", "B"]);
    /// assert_eq!(plan.layout, Layout::ForceDirected);
    /// # Ok::<(), tessera_core::ValidationError>(())
    /// ```
    #[must_use]
    pub fn from_graph(graph: &ContactGraph<'_>, policy: &LayoutPolicy) -> Self {
        Self {
            nodes: graph.matrix().names().to_vec(),
            edges: graph.edges().to_vec(),
            layout: policy.select(graph.node_count(), graph.density()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cycle_matrix, matrix_from_edges};

    use rstest::rstest;

    #[rstest]
    #[case(0, 0.0, Layout::ForceDirected)]
    #[case(10, 1.0, Layout::ForceDirected)]
    #[case(11, 0.6, Layout::Circular)]
    #[case(11, 0.59, Layout::StressMinimizing)]
    #[case(20, 0.0, Layout::StressMinimizing)]
    #[case(21, 0.3, Layout::ForceDirected)]
    #[case(50, 0.3, Layout::ForceDirected)]
    #[case(51, 0.3, Layout::Spectral)]
    #[case(500, 0.9, Layout::Circular)]
    fn default_policy_thresholds(
        #[case] nodes: usize,
        #[case] density: f64,
        #[case] expected: Layout,
    ) {
        assert_eq!(select_layout(nodes, density), expected);
    }

    #[test]
    fn custom_policy_moves_thresholds() {
        let policy = LayoutPolicy {
            small_max_nodes: 2,
            ..LayoutPolicy::default()
        };
        assert_eq!(policy.select(3, 0.0), Layout::StressMinimizing);
    }

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(1, 0, 0.0)]
    #[case(2, 1, 1.0)]
    #[case(5, 5, 0.5)]
    fn density_over_possible_pairs(#[case] nodes: usize, #[case] edges: usize, #[case] expected: f64) {
        assert_eq!(edge_density(nodes, edges), expected);
    }

    #[test]
    fn render_plan_uses_graph_counts() {
        let matrix = cycle_matrix(12);
        let graph = ContactGraph::from_matrix(&matrix);
        let plan = RenderPlan::from_graph(&graph, &LayoutPolicy::default());
        assert_eq!(plan.nodes.len(), 12);
        assert_eq!(plan.edges.len(), 12);
        assert_eq!(plan.layout, Layout::StressMinimizing);

        let dense = matrix_from_edges(
            11,
            &(0..11)
                .flat_map(|left| ((left + 1)..11).map(move |right| (left, right)))
                .collect::<Vec<_>>(),
        );
        let plan = RenderPlan::from_graph(&ContactGraph::from_matrix(&dense), &LayoutPolicy::default());
        assert_eq!(plan.layout, Layout::Circular);
        assert_eq!(plan.layout.to_string(), "circular");
    }
}
