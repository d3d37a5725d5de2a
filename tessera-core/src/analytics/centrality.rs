//! Degree, betweenness and closeness centrality on unweighted graphs.

use std::collections::VecDeque;

use crate::graph::ContactGraph;

/// `degree / (n - 1)`, all zero for a single node.
pub(crate) fn degree_centrality(graph: &ContactGraph<'_>) -> Vec<f64> {
    let nodes = graph.node_count();
    if nodes <= 1 {
        return vec![0.0; nodes];
    }
    let scale = 1.0 / (nodes - 1) as f64;
    (0..nodes)
        .map(|node| graph.degree(node) as f64 * scale)
        .collect()
}

/// Brandes' algorithm with breadth-first shortest paths.
///
/// Each unordered pair is counted once; for `n > 2` the scores are divided
/// by `(n - 1)(n - 2) / 2`, the number of pairs not involving the node.
pub(crate) fn betweenness_centrality(graph: &ContactGraph<'_>) -> Vec<f64> {
    let nodes = graph.node_count();
    let mut scores = vec![0.0_f64; nodes];
    let mut order: Vec<usize> = Vec::with_capacity(nodes);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); nodes];
    let mut paths = vec![0.0_f64; nodes];
    let mut distance: Vec<Option<usize>> = vec![None; nodes];
    let mut dependency = vec![0.0_f64; nodes];
    let mut queue = VecDeque::with_capacity(nodes);

    for source in 0..nodes {
        order.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        paths.fill(0.0);
        distance.fill(None);
        dependency.fill(0.0);

        paths[source] = 1.0;
        distance[source] = Some(0);
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            let Some(hops) = distance[node] else {
                continue;
            };
            for &next in graph.neighbours(node) {
                if distance[next].is_none() {
                    distance[next] = Some(hops + 1);
                    queue.push_back(next);
                }
                if distance[next] == Some(hops + 1) {
                    paths[next] += paths[node];
                    predecessors[next].push(node);
                }
            }
        }

        while let Some(node) = order.pop() {
            for &previous in &predecessors[node] {
                dependency[previous] += paths[previous] / paths[node] * (1.0 + dependency[node]);
            }
            if node != source {
                scores[node] += dependency[node];
            }
        }
    }

    // Every unordered pair was visited from both ends.
    let scale = if nodes > 2 {
        1.0 / ((nodes - 1) * (nodes - 2)) as f64
    } else {
        0.0
    };
    scores.iter_mut().for_each(|score| *score *= scale);
    scores
}

/// `(r - 1) / d` over the `r` nodes reachable from each node, including
/// itself, at total hop distance `d`; zero when nothing else is reachable.
pub(crate) fn closeness_centrality(graph: &ContactGraph<'_>) -> Vec<f64> {
    let nodes = graph.node_count();
    let mut distance: Vec<Option<usize>> = vec![None; nodes];
    let mut queue = VecDeque::with_capacity(nodes);

    (0..nodes)
        .map(|source| {
            distance.fill(None);
            distance[source] = Some(0);
            queue.push_back(source);
            let mut reachable = 0_usize;
            let mut total = 0_usize;
            while let Some(node) = queue.pop_front() {
                let Some(hops) = distance[node] else {
                    continue;
                };
                reachable += 1;
                total += hops;
                for &next in graph.neighbours(node) {
                    if distance[next].is_none() {
                        distance[next] = Some(hops + 1);
                        queue.push_back(next);
                    }
                }
            }
            if reachable <= 1 || total == 0 {
                0.0
            } else {
                (reachable - 1) as f64 / total as f64
            }
        })
        .collect()
}
