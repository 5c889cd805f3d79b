#![forbid(unsafe_code)]
//! netrics-metrics library.
//!
//! # Overview
//!
//! One module per metric of the battery. Every algorithm borrows a finished
//! [`Graph`], treats it as unweighted and returns a fresh map keyed by
//! [`NodeId`]:
//!
//! - **Degree centrality** (`degree`): share of the other nodes a node
//!   touches.
//! - **Closeness centrality** (`closeness`): inverse mean hop distance,
//!   scaled for disconnected graphs.
//! - **Betweenness / edge betweenness** (`betweenness`): Brandes' algorithm.
//! - **Eigenvector centrality** (`eigenvector`) and **PageRank**
//!   (`pagerank`): power iterations under the [`Convergence`] contract.
//! - **Clustering coefficient** (`clustering`): triangle density around a
//!   node, direction ignored.
//! - **Shortest paths** (`shortest_paths`): all-pairs BFS hop counts.
//!
//! [`engine::compute_all`] runs the whole battery in [`MetricName`] order.
//!
//! # Conventions
//!
//! - **Errors**: only the power iterations fail, with
//!   [`netrics_core::ConvergenceError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! [`Graph`]: netrics_core::Graph
//! [`NodeId`]: netrics_core::NodeId
//! [`Convergence`]: netrics_core::Convergence
//! [`MetricName`]: netrics_core::MetricName

use netrics_core::Graph;
use netrics_core::document::NodeScores;
use petgraph::graph::NodeIndex;

pub mod betweenness;
pub mod closeness;
pub mod clustering;
pub mod degree;
pub mod eigenvector;
pub mod engine;
pub mod pagerank;
pub mod shortest_paths;

pub use engine::{compute, compute_all};

/// Map a node-indexed vector back to node ids.
pub(crate) fn node_scores(graph: &Graph, values: &[f64]) -> NodeScores {
    graph
        .node_indices()
        .map(|idx| (graph.node_id(idx).clone(), values[idx.index()]))
        .collect()
}

/// Per-node value computed independently for every node.
pub(crate) fn score_each(graph: &Graph, mut f: impl FnMut(NodeIndex) -> f64) -> NodeScores {
    graph
        .node_indices()
        .map(|idx| (graph.node_id(idx).clone(), f(idx)))
        .collect()
}
