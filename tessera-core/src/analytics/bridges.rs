//! Bridge detection with an explicit-stack depth-first search.

use crate::graph::{ContactGraph, Edge};

const UNVISITED: usize = usize::MAX;

struct Frame {
    node: usize,
    parent: Option<usize>,
    next: usize,
}

/// Finds every edge whose removal disconnects its component.
///
/// Discovery times and low-links are tracked on a heap-allocated stack, so
/// long chains cannot exhaust the thread stack. The graph is simple, so
/// skipping the parent node is equivalent to skipping the tree edge.
pub(crate) fn bridges(graph: &ContactGraph<'_>) -> Vec<Edge> {
    let nodes = graph.node_count();
    let mut discovery = vec![UNVISITED; nodes];
    let mut low = vec![0_usize; nodes];
    let mut timer = 0_usize;
    let mut found = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..nodes {
        if discovery[root] != UNVISITED {
            continue;
        }
        discovery[root] = timer;
        low[root] = timer;
        timer += 1;
        stack.push(Frame {
            node: root,
            parent: None,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let parent = frame.parent;
            if let Some(&neighbour) = graph.neighbours(node).get(frame.next) {
                frame.next += 1;
                if Some(neighbour) == parent {
                    continue;
                }
                if discovery[neighbour] == UNVISITED {
                    discovery[neighbour] = timer;
                    low[neighbour] = timer;
                    timer += 1;
                    stack.push(Frame {
                        node: neighbour,
                        parent: Some(node),
                        next: 0,
                    });
                } else {
                    low[node] = low[node].min(discovery[neighbour]);
                }
                continue;
            }

            stack.pop();
            if let Some(parent) = parent {
                low[parent] = low[parent].min(low[node]);
                if low[node] > discovery[parent] {
                    found.push(Edge::new(parent, node));
                }
            }
        }
    }

    found.sort_unstable();
    found
}
