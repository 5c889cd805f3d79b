//! Graph construction from a [`GraphDescription`].
//!
//! # Overview
//!
//! The graph is stored as a petgraph [`DiGraph`] whatever its directedness.
//! Undirected graphs keep exactly one stored edge per unordered pair (in the
//! direction it was first declared); neighbor queries then walk both
//! directions. Metrics only ever see [`Graph`], never the petgraph value.
//!
//! ## Inclusion rules
//!
//! - A node exists iff its presence flag is truthy.
//! - An edge exists iff its flag is truthy, both endpoints exist and the
//!   endpoints differ after [`NodeId`] normalization.
//! - Duplicate declarations collapse to one edge; on undirected graphs
//!   `a → b` and `b → a` are the same declaration.
//!
//! Nothing here fails: malformed rows simply contribute no nodes or edges.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, Neighbors, NodeIndex};
use petgraph::visit::EdgeRef;
use serde_json::Value;
use tracing::{debug, instrument};

use super::description::{GraphDescription, is_truthy};
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Immutable unweighted graph over [`NodeId`]s.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: DiGraph<NodeId, ()>,
    node_map: HashMap<NodeId, NodeIndex>,
    directed: bool,
    content_hash: String,
}

impl Graph {
    /// Build the graph described by `description`.
    #[must_use]
    #[instrument(skip(description))]
    pub fn from_description(description: &GraphDescription) -> Self {
        let nodes = description
            .nodes
            .iter()
            .filter(|(_, present)| is_truthy(present))
            .map(|(key, _)| NodeId::parse(key));

        let edges = description
            .adjacency
            .iter()
            .filter_map(|(source, row)| match row {
                Value::Object(targets) => Some((NodeId::parse(source), targets)),
                _ => None,
            })
            .flat_map(|(source, targets)| {
                targets
                    .iter()
                    .filter(|(_, flag)| is_truthy(flag))
                    .map(move |(target, _)| (source.clone(), NodeId::parse(target)))
            });

        Self::new(nodes, edges, !description.is_bidirectional)
    }

    /// Build a graph from explicit node and edge lists.
    ///
    /// The inclusion rules of [`Graph::from_description`] apply: edges with
    /// an unknown endpoint and self-loops are dropped, duplicates collapse.
    pub fn new<N, E>(nodes: N, edges: E, directed: bool) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = DiGraph::<NodeId, ()>::new();
        let mut node_map: HashMap<NodeId, NodeIndex> = HashMap::new();

        for id in nodes {
            node_map
                .entry(id)
                .or_insert_with_key(|id| graph.add_node(id.clone()));
        }

        let mut dropped = 0usize;
        for (source, target) in edges {
            let (Some(&a), Some(&b)) = (node_map.get(&source), node_map.get(&target)) else {
                dropped += 1;
                continue;
            };
            if a == b {
                dropped += 1;
                continue;
            }
            let exists = if directed {
                graph.contains_edge(a, b)
            } else {
                graph.contains_edge(a, b) || graph.contains_edge(b, a)
            };
            if !exists {
                graph.add_edge(a, b, ());
            }
        }

        let content_hash = compute_content_hash(&graph, directed);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed,
            dropped,
            %content_hash,
            "graph built"
        );

        Self {
            graph,
            node_map,
            directed,
            content_hash,
        }
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges; unordered pairs on undirected graphs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// BLAKE3 hash of directedness, sorted node set and sorted edge set.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Node indices in insertion order (`0..node_count`).
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    #[must_use]
    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Identifier of the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> &NodeId {
        &self.graph[idx]
    }

    /// Nodes reachable in one step: out-neighbors on directed graphs, all
    /// neighbors on undirected ones.
    #[must_use]
    pub fn successors(&self, idx: NodeIndex) -> Neighbors<'_, ()> {
        if self.directed {
            self.graph.neighbors_directed(idx, Direction::Outgoing)
        } else {
            self.graph.neighbors_undirected(idx)
        }
    }

    /// Nodes with an edge into `idx`; all neighbors on undirected graphs.
    #[must_use]
    pub fn predecessors(&self, idx: NodeIndex) -> Neighbors<'_, ()> {
        if self.directed {
            self.graph.neighbors_directed(idx, Direction::Incoming)
        } else {
            self.graph.neighbors_undirected(idx)
        }
    }

    /// Distinct neighbors ignoring direction, sorted by index.
    #[must_use]
    pub fn symmetric_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut nbrs: Vec<NodeIndex> = self.graph.neighbors_undirected(idx).collect();
        nbrs.sort_unstable();
        nbrs.dedup();
        nbrs
    }

    #[must_use]
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.successors(idx).count()
    }

    #[must_use]
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.predecessors(idx).count()
    }

    /// Total degree: in + out on directed graphs, neighbor count otherwise.
    #[must_use]
    pub fn degree(&self, idx: NodeIndex) -> usize {
        if self.directed {
            self.out_degree(idx) + self.in_degree(idx)
        } else {
            self.out_degree(idx)
        }
    }

    /// Whether `a → b` is an edge (either orientation when undirected).
    #[must_use]
    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        if self.directed {
            self.graph.contains_edge(a, b)
        } else {
            self.graph.contains_edge(a, b) || self.graph.contains_edge(b, a)
        }
    }

    /// Stored edges as `(source, target)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compute_content_hash(graph: &DiGraph<NodeId, ()>, directed: bool) -> String {
    let mut nodes: Vec<&NodeId> = graph.node_indices().map(|i| &graph[i]).collect();
    nodes.sort();

    let mut edges: Vec<(&NodeId, &NodeId)> = graph
        .edge_references()
        .map(|e| {
            let (a, b) = (&graph[e.source()], &graph[e.target()]);
            if directed || a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    edges.sort();

    let mut hasher = blake3::Hasher::new();
    hasher.update(if directed { b"directed\x00" } else { b"undirect\x00" });
    for id in nodes {
        hasher.update(id.to_string().as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (a, b) in edges {
        hasher.update(a.to_string().as_bytes());
        hasher.update(b"\x00");
        hasher.update(b.to_string().as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
