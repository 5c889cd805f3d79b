//! Degree centrality.
//!
//! `degree(v) / (n - 1)`, where degree counts in- and out-edges on directed
//! graphs. Graphs with at most one node score every node 0.

use netrics_core::Graph;
use netrics_core::document::NodeScores;
use tracing::instrument;

use crate::score_each;

#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &Graph) -> NodeScores {
    let n = graph.node_count();
    if n <= 1 {
        return score_each(graph, |_| 0.0);
    }
    let scale = 1.0 / (n - 1) as f64;
    score_each(graph, |idx| graph.degree(idx) as f64 * scale)
}
