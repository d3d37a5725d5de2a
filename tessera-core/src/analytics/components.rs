//! Connected components via union-find.

use crate::graph::ContactGraph;

#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    fn union(&mut self, left: usize, right: usize) {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
    }
}

/// Partitions the nodes into connected components.
///
/// Each component is sorted ascending and components are ordered by their
/// smallest member.
pub(crate) fn connected_components(graph: &ContactGraph<'_>) -> Vec<Vec<usize>> {
    let nodes = graph.node_count();
    let mut sets = DisjointSet::new(nodes);
    for edge in graph.edges() {
        sets.union(edge.source(), edge.target());
    }

    let mut slot_of_root = vec![usize::MAX; nodes];
    let mut components: Vec<Vec<usize>> = Vec::new();
    // Ascending scan: first sighting of a root is its smallest member.
    for node in 0..nodes {
        let root = sets.find(node);
        if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = components.len();
            components.push(Vec::new());
        }
        components[slot_of_root[root]].push(node);
    }
    components
}
