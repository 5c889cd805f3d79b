//! All-pairs shortest-path lengths by repeated BFS.
//!
//! # Output
//!
//! A [`Distances`] map `source → target → hops`. Only reachable pairs are
//! present; every node reaches itself at distance 0, so each source has at
//! least its own entry.

use std::collections::VecDeque;

use netrics_core::Graph;
use netrics_core::document::Distances;
use petgraph::graph::NodeIndex;
use tracing::instrument;

/// Which way a BFS follows edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Along edges: distance from the source to each node.
    Forward,
    /// Against edges: distance from each node to the source.
    Backward,
}

/// Hop distance from `source` to every node, `None` when unreachable.
///
/// On undirected graphs both walks are the same.
#[must_use]
pub fn bfs_distances(graph: &Graph, source: NodeIndex, walk: Walk) -> Vec<Option<u64>> {
    let mut dist: Vec<Option<u64>> = vec![None; graph.node_count()];
    dist[source.index()] = Some(0);

    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let Some(dv) = dist[v.index()] else { continue };
        let neighbors = match walk {
            Walk::Forward => graph.successors(v),
            Walk::Backward => graph.predecessors(v),
        };
        for w in neighbors {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(dv + 1);
                queue.push_back(w);
            }
        }
    }

    dist
}

/// Compute hop distances between every reachable ordered pair.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn all_pairs_shortest_path_length(graph: &Graph) -> Distances {
    graph
        .node_indices()
        .map(|s| {
            let row = bfs_distances(graph, s, Walk::Forward)
                .into_iter()
                .enumerate()
                .filter_map(|(t, d)| d.map(|d| (graph.node_id(NodeIndex::new(t)).clone(), d)))
                .collect();
            (graph.node_id(s).clone(), row)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
