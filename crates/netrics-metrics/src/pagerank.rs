//! PageRank by power iteration.
//!
//! # Algorithm
//!
//! ```text
//! PR₀(v)  = 1 / n
//! PR'(v)  = (1 - d) / n  +  d · D / n  +  d · Σ PR(u) / out(u)   for u → v
//! ```
//!
//! where `d` is the damping factor and `D` the total rank held by dangling
//! nodes (no successors), which is spread evenly over every node. Undirected
//! graphs push rank along every incident edge. Rank mass stays 1 at each
//! step; iteration stops under the [`Convergence`] contract.
//!
//! [`Convergence`]: netrics_core::Convergence

use netrics_core::config::PageRankConfig;
use netrics_core::document::NodeScores;
use netrics_core::{ConvergenceError, Graph, MetricName};
use tracing::instrument;

use crate::node_scores;

/// # Errors
///
/// Returns [`ConvergenceError`] when the L1 change does not fall below
/// `config.tolerance` within `config.max_iter` steps.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(graph: &Graph, config: &PageRankConfig) -> Result<NodeScores, ConvergenceError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(NodeScores::new());
    }

    let nf = n as f64;
    let d = config.damping;
    let out_degree: Vec<usize> = graph.node_indices().map(|v| graph.out_degree(v)).collect();

    let converged = config
        .convergence()
        .run(MetricName::PageRank, vec![1.0 / nf; n], |cur, next| {
            let dangling: f64 = graph
                .node_indices()
                .filter(|v| out_degree[v.index()] == 0)
                .map(|v| cur[v.index()])
                .sum();
            next.fill((1.0 - d) / nf + d * dangling / nf);

            for u in graph.node_indices() {
                let k = out_degree[u.index()];
                if k == 0 {
                    continue;
                }
                let share = d * cur[u.index()] / k as f64;
                for w in graph.successors(u) {
                    next[w.index()] += share;
                }
            }
        })?;

    Ok(node_scores(graph, &converged.vector))
}
