//! Undirected contact graph derived from a [`ContactMatrix`].

use tracing::{debug, instrument};

use crate::matrix::{ContactMatrix, upper_triangle};

/// An undirected edge between two distinct parts, stored with
/// `source < target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Creates an edge, ordering the endpoints canonically.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::Edge;
    ///
    /// assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
    /// assert_eq!(Edge::new(3, 1).source(), 1);
    /// ```
    #[must_use]
    pub fn new(left: usize, right: usize) -> Self {
        Self {
            source: left.min(right),
            target: left.max(right),
        }
    }

    /// Returns the smaller endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn target(&self) -> usize { self.target }

    /// Returns the endpoints as `(source, target)`.
    #[rustfmt::skip]
    #[must_use]
    pub fn endpoints(&self) -> (usize, usize) { (self.source, self.target) }
}

/// Simple undirected graph with one node per matrix index.
///
/// The graph borrows its matrix, so it can never outlive or drift from the
/// data it was derived from.
///
/// # Examples
/// ```
/// use tessera_core::{ContactGraph, ContactMatrix, Edge};
///
/// let matrix = ContactMatrix::try_new(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]],
/// )?;
/// let graph = ContactGraph::from_matrix(&matrix);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edges(), [Edge::new(0, 1), Edge::new(1, 2)]);
/// assert_eq!(graph.neighbours(1), [0, 2]);
/// # Ok::<(), tessera_core::ValidationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ContactGraph<'a> {
    matrix: &'a ContactMatrix,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

impl<'a> ContactGraph<'a> {
    /// Derives the graph from a validated matrix. Edges are listed in
    /// row-major order and the diagonal never produces self-loops.
    #[must_use]
    #[instrument(name = "core.graph", skip(matrix), fields(parts = matrix.size()))]
    pub fn from_matrix(matrix: &'a ContactMatrix) -> Self {
        let adjacency: Vec<Vec<usize>> = matrix
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|&(column, value)| column != row && *value == 1)
                    .map(|(column, _)| column)
                    .collect()
            })
            .collect();
        let edges: Vec<Edge> = upper_triangle(matrix.size())
            .filter(|&(row, column)| matrix.is_contact(row, column))
            .map(|(row, column)| Edge::new(row, column))
            .collect();
        debug!(edges = edges.len(), "contact graph derived");
        Self {
            matrix,
            adjacency,
            edges,
        }
    }

    /// Returns the source matrix.
    #[rustfmt::skip]
    #[must_use]
    pub fn matrix(&self) -> &'a ContactMatrix { self.matrix }

    /// Returns the number of nodes.
    #[rustfmt::skip]
    #[must_use]
    pub fn node_count(&self) -> usize { self.adjacency.len() }

    /// Returns the number of edges.
    #[rustfmt::skip]
    #[must_use]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns every edge in row-major order.
    #[rustfmt::skip]
    #[must_use]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the sorted neighbours of `node`, empty when out of range.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the degree of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }

    /// Returns the validated name of `node`.
    #[must_use]
    pub fn name(&self, node: usize) -> Option<&'a str> {
        self.matrix.name(node)
    }

    /// Returns the share of possible edges present, `0.0` below two nodes.
    #[must_use]
    pub fn density(&self) -> f64 {
        crate::layout::edge_density(self.node_count(), self.edge_count())
    }
}
