//! Local clustering coefficient.
//!
//! Direction is ignored: `k` is the number of distinct neighbors of `v` and
//! `T` the number of neighbor pairs joined by an edge in either direction.
//! The coefficient is `2T / (k (k - 1))` for `k ≥ 2` and 0 otherwise.

use netrics_core::Graph;
use netrics_core::document::NodeScores;
use tracing::instrument;

use crate::score_each;

#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn clustering_coefficient(graph: &Graph) -> NodeScores {
    score_each(graph, |v| {
        let nbrs = graph.symmetric_neighbors(v);
        let k = nbrs.len();
        if k < 2 {
            return 0.0;
        }

        let mut triangles = 0usize;
        for (i, &a) in nbrs.iter().enumerate() {
            for &b in &nbrs[i + 1..] {
                if graph.has_edge(a, b) || graph.has_edge(b, a) {
                    triangles += 1;
                }
            }
        }

        2.0 * triangles as f64 / (k * (k - 1)) as f64
    })
}
