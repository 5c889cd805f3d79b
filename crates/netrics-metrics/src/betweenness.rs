//! Node and edge betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a node (or an edge) lies on shortest
//! paths between other pairs of nodes. High scores mark bridges and
//! bottlenecks.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source `s`, BFS records distances, shortest-path counts
//!    `sigma` and the predecessors of every node on those paths.
//! 2. Dependencies are accumulated in reverse BFS order (farthest first),
//!    either onto intermediate nodes or onto the DAG edges themselves.
//! 3. Per-source contributions are summed.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! On undirected graphs every unordered pair is seen from both ends, so raw
//! sums are halved. For `n > 2` the result is then multiplied by
//! `1 / ((n-1)(n-2))` (directed) or `2 / ((n-1)(n-2))` (undirected); smaller
//! graphs keep the raw value. Node and edge scores share the same divisor.

use std::collections::{BTreeMap, HashMap, VecDeque};

use netrics_core::Graph;
use netrics_core::document::{NodeScores, PairScores};
use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::node_scores;

// ---------------------------------------------------------------------------
// Shortest-path DAG
// ---------------------------------------------------------------------------

/// BFS shortest-path DAG rooted at one source.
struct PathDag {
    /// Nodes in BFS discovery order.
    order: Vec<NodeIndex>,
    /// `predecessors[w]`: nodes directly before `w` on shortest paths.
    predecessors: Vec<Vec<NodeIndex>>,
    /// `sigma[w]`: number of shortest paths from the source to `w`.
    sigma: Vec<f64>,
}

impl PathDag {
    fn from_source(graph: &Graph, source: NodeIndex) -> Self {
        let n = graph.node_count();
        let mut order = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0; n];
        let mut dist: Vec<Option<u64>> = vec![None; n];

        sigma[source.index()] = 1.0;
        dist[source.index()] = Some(0);

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let Some(dv) = dist[v.index()] else { continue };

            for w in graph.successors(v) {
                let wi = w.index();
                if dist[wi].is_none() {
                    dist[wi] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[wi] == Some(dv + 1) {
                    sigma[wi] += sigma[v.index()];
                    predecessors[wi].push(v);
                }
            }
        }

        Self {
            order,
            predecessors,
            sigma,
        }
    }
}

/// Combined scale factor applied to raw Brandes sums.
#[allow(clippy::cast_precision_loss)]
fn rescale_factor(graph: &Graph) -> f64 {
    let n = graph.node_count();
    let directed = graph.is_directed();
    let halve = if directed { 1.0 } else { 0.5 };

    if n <= 2 {
        return halve;
    }
    let pairs = ((n - 1) * (n - 2)) as f64;
    let norm = if directed { 1.0 / pairs } else { 2.0 / pairs };
    halve * norm
}

// ---------------------------------------------------------------------------
// Node betweenness
// ---------------------------------------------------------------------------

#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn betweenness_centrality(graph: &Graph) -> NodeScores {
    let n = graph.node_count();
    let mut cb = vec![0.0; n];

    for s in graph.node_indices() {
        let dag = PathDag::from_source(graph, s);
        let mut delta = vec![0.0; n];

        for &w in dag.order.iter().rev() {
            let wi = w.index();
            let coeff = (1.0 + delta[wi]) / dag.sigma[wi];
            for &v in &dag.predecessors[wi] {
                delta[v.index()] += dag.sigma[v.index()] * coeff;
            }
            if w != s {
                cb[wi] += delta[wi];
            }
        }
    }

    let scale = rescale_factor(graph);
    for value in &mut cb {
        *value *= scale;
    }
    node_scores(graph, &cb)
}

// ---------------------------------------------------------------------------
// Edge betweenness
// ---------------------------------------------------------------------------

/// Betweenness of every edge, nested `source → target → score`.
///
/// Undirected edges appear once, keyed by the smaller [`NodeId`] first.
///
/// [`NodeId`]: netrics_core::NodeId
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn edge_betweenness_centrality(graph: &Graph) -> PairScores {
    let directed = graph.is_directed();
    let key = |a: NodeIndex, b: NodeIndex| {
        if directed || a <= b { (a, b) } else { (b, a) }
    };

    let mut cb: HashMap<(NodeIndex, NodeIndex), f64> =
        graph.edges().map(|(a, b)| (key(a, b), 0.0)).collect();

    for s in graph.node_indices() {
        let dag = PathDag::from_source(graph, s);
        let mut delta = vec![0.0; graph.node_count()];

        for &w in dag.order.iter().rev() {
            let wi = w.index();
            let coeff = (1.0 + delta[wi]) / dag.sigma[wi];
            for &v in &dag.predecessors[wi] {
                let c = dag.sigma[v.index()] * coeff;
                *cb.entry(key(v, w)).or_insert(0.0) += c;
                delta[v.index()] += c;
            }
        }
    }

    let scale = rescale_factor(graph);
    let mut out: PairScores = BTreeMap::new();
    for ((a, b), raw) in cb {
        let (mut src, mut dst) = (graph.node_id(a), graph.node_id(b));
        if !directed && dst < src {
            std::mem::swap(&mut src, &mut dst);
        }
        out.entry(src.clone())
            .or_default()
            .insert(dst.clone(), raw * scale);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
