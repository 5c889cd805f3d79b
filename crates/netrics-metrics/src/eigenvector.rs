//! Eigenvector centrality by power iteration.
//!
//! # Algorithm
//!
//! ```text
//! x₀[v]     = 1 / √n
//! x'[v]     = x[v] + Σ x[u]     for each edge u → v
//! x_{k+1}   = x' / ‖x'‖₂
//! ```
//!
//! The product uses `A + I`: same dominant eigenvector as `A`, but the
//! iteration does not flip between the two halves of a bipartite graph.
//! Directed graphs use incoming edges as given; undirected graphs use every
//! neighbor. Iteration stops under the [`Convergence`] contract.
//!
//! Graphs without a dominant eigenvalue (acyclic directed graphs, for
//! instance) typically fail to converge and surface a [`ConvergenceError`].

use netrics_core::document::NodeScores;
use netrics_core::{Convergence, ConvergenceError, Graph, MetricName};
use tracing::instrument;

use crate::node_scores;

/// # Errors
///
/// Returns [`ConvergenceError`] when the L1 change does not fall below
/// `convergence.tolerance` within `convergence.max_iter` steps.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(
    graph: &Graph,
    convergence: &Convergence,
) -> Result<NodeScores, ConvergenceError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(NodeScores::new());
    }

    let initial = vec![1.0 / (n as f64).sqrt(); n];
    let converged = convergence.run(MetricName::EigenvectorCentrality, initial, |cur, next| {
        for v in graph.node_indices() {
            let inflow: f64 = graph.predecessors(v).map(|u| cur[u.index()]).sum();
            next[v.index()] = cur[v.index()] + inflow;
        }
        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in next.iter_mut() {
                *x /= norm;
            }
        }
    })?;

    Ok(node_scores(graph, &converged.vector))
}
