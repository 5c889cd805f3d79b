//! Closeness centrality with the Wasserman–Faust scaling.
//!
//! # Algorithm
//!
//! For each node `v`, BFS gives the hop distances between `v` and the `r`
//! nodes it is connected to. With `S` their sum:
//!
//! ```text
//! closeness(v) = (r / S) * (r / (n - 1))      r > 0
//!              = 0                             r = 0
//! ```
//!
//! The second factor scales down nodes that only reach part of a
//! disconnected graph. On directed graphs distances are measured inward
//! (from each `u` to `v`), so a sink of many paths scores high.

use netrics_core::Graph;
use netrics_core::document::NodeScores;
use tracing::instrument;

use crate::score_each;
use crate::shortest_paths::{Walk, bfs_distances};

#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(graph: &Graph) -> NodeScores {
    let n = graph.node_count();

    score_each(graph, |v| {
        let (reached, total) = bfs_distances(graph, v, Walk::Backward)
            .into_iter()
            .flatten()
            .filter(|&d| d > 0)
            .fold((0u64, 0u64), |(r, s), d| (r + 1, s + d));

        if reached == 0 || total == 0 {
            return 0.0;
        }
        let r = reached as f64;
        (r / total as f64) * (r / (n - 1) as f64)
    })
}
