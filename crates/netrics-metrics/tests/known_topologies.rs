//! Known-topology regression tests for the metric battery.
//!
//! Each test uses a hand-crafted graph with known properties. Expected
//! values are derived by hand and hardcoded, so any change in traversal or
//! normalization shows up here.

use std::collections::BTreeMap;

use netrics_core::config::{NetricsConfig, PageRankConfig};
use netrics_core::{Convergence, Graph, GraphDescription, MetricMap, MetricName, NodeId};
use netrics_metrics::betweenness::{betweenness_centrality, edge_betweenness_centrality};
use netrics_metrics::closeness::closeness_centrality;
use netrics_metrics::clustering::clustering_coefficient;
use netrics_metrics::degree::degree_centrality;
use netrics_metrics::eigenvector::eigenvector_centrality;
use netrics_metrics::pagerank::pagerank;
use netrics_metrics::shortest_paths::all_pairs_shortest_path_length;
use netrics_metrics::{compute, compute_all};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_graph(nodes: &[&str], edges: &[(&str, &str)], directed: bool) -> Graph {
    Graph::new(
        nodes.iter().map(|n| NodeId::parse(n)),
        edges.iter().map(|(a, b)| (NodeId::parse(a), NodeId::parse(b))),
        directed,
    )
}

fn id(raw: &str) -> NodeId {
    NodeId::parse(raw)
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}

// ===========================================================================
// Topology 1: Undirected triangle
//
//   A - B
//    \ /
//     C
//
// Properties:
//   - Every node touches every other: degree and closeness are 1.
//   - Every neighborhood is closed: clustering is 1.
//   - No node is ever an intermediary: betweenness is 0.
// ===========================================================================

fn triangle() -> Graph {
    build_graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")], false)
}

#[test]
fn triangle_local_metrics() {
    let g = triangle();
    for key in ["A", "B", "C"] {
        assert_close(degree_centrality(&g)[&id(key)], 1.0, "degree");
        assert_close(closeness_centrality(&g)[&id(key)], 1.0, "closeness");
        assert_close(clustering_coefficient(&g)[&id(key)], 1.0, "clustering");
        assert_close(betweenness_centrality(&g)[&id(key)], 0.0, "betweenness");
    }
}

#[test]
fn triangle_edges_carry_their_own_pair_only() {
    // Each edge lies on one unordered pair: raw 1, divisor 2/(2·1).
    let ebc = edge_betweenness_centrality(&triangle());
    let total: usize = ebc.values().map(BTreeMap::len).sum();
    assert_eq!(total, 3);
    for row in ebc.values() {
        for value in row.values() {
            assert_close(*value, 1.0, "edge betweenness");
        }
    }
}

#[test]
fn triangle_spectral_metrics_are_uniform() {
    let g = triangle();
    let ec = eigenvector_centrality(&g, &Convergence::EIGENVECTOR).expect("converges");
    let pr = pagerank(&g, &PageRankConfig::default()).expect("converges");
    for key in ["A", "B", "C"] {
        assert_close(ec[&id(key)], 1.0 / 3.0_f64.sqrt(), "eigenvector");
        assert_close(pr[&id(key)], 1.0 / 3.0, "pagerank");
    }
}

// ===========================================================================
// Topology 2: Directed path (A → B → C → D)
//
// Properties:
//   - Shortest paths only run downstream; D reaches nothing but itself.
//   - B and C each sit on two of the six reachable pairs.
//   - PageRank grows toward the sink.
//   - Eigenvector centrality has no dominant eigenvector and fails.
// ===========================================================================

fn chain() -> Graph {
    build_graph(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("C", "D")],
        true,
    )
}

#[test]
fn chain_shortest_paths() {
    let sp = all_pairs_shortest_path_length(&chain());
    let from_a: Vec<(String, u64)> = sp[&id("A")]
        .iter()
        .map(|(k, d)| (k.to_string(), *d))
        .collect();
    assert_eq!(
        from_a,
        vec![
            ("A".to_string(), 0),
            ("B".to_string(), 1),
            ("C".to_string(), 2),
            ("D".to_string(), 3)
        ]
    );
    assert_eq!(sp[&id("D")].len(), 1);
    assert_eq!(sp[&id("D")][&id("D")], 0);
}

#[test]
fn chain_betweenness_and_degree() {
    let g = chain();
    let bc = betweenness_centrality(&g);
    assert_close(bc[&id("B")], 2.0 / 6.0, "betweenness B");
    assert_close(bc[&id("C")], 2.0 / 6.0, "betweenness C");
    assert_close(bc[&id("A")], 0.0, "betweenness A");

    let dc = degree_centrality(&g);
    assert_close(dc[&id("A")], 1.0 / 3.0, "degree A");
    assert_close(dc[&id("C")], 2.0 / 3.0, "degree C");
}

#[test]
fn chain_pagerank_grows_downstream() {
    let pr = pagerank(&chain(), &PageRankConfig::default()).expect("converges");
    assert!(pr[&id("A")] < pr[&id("B")]);
    assert!(pr[&id("B")] < pr[&id("C")]);
    assert!(pr[&id("C")] < pr[&id("D")]);
    let sum: f64 = pr.values().sum();
    assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
}

#[test]
fn chain_battery_stops_at_eigenvector() {
    let err = compute_all(&chain(), &NetricsConfig::default()).expect_err("acyclic digraph");
    assert_eq!(err.metric, MetricName::EigenvectorCentrality);
    assert_eq!(err.iterations, 100);
}

// ===========================================================================
// Topology 3: Undirected star, hub 0 with leaves 1..4
//
// Properties:
//   - The hub lies on every leaf-to-leaf path: betweenness 1.
//   - Leaves have a single neighbor: clustering 0.
//   - PageRank favors the hub once the tolerance allows convergence.
// ===========================================================================

fn star() -> Graph {
    build_graph(
        &["0", "1", "2", "3", "4"],
        &[("0", "1"), ("0", "2"), ("0", "3"), ("0", "4")],
        false,
    )
}

#[test]
fn star_structure() {
    let g = star();
    assert_close(betweenness_centrality(&g)[&id("0")], 1.0, "hub betweenness");
    assert_close(closeness_centrality(&g)[&id("0")], 1.0, "hub closeness");
    assert_close(closeness_centrality(&g)[&id("3")], 4.0 / 7.0, "leaf closeness");
    assert_close(degree_centrality(&g)[&id("2")], 0.25, "leaf degree");
    assert!(clustering_coefficient(&g).values().all(|c| c.abs() < 1e-12));
}

#[test]
fn star_pagerank_with_relaxed_tolerance() {
    let config = NetricsConfig {
        pagerank: PageRankConfig {
            tolerance: 1e-6,
            ..PageRankConfig::default()
        },
        ..NetricsConfig::default()
    };
    let report = compute_all(&star(), &config).expect("converges");
    let pr = report.metrics[&MetricName::PageRank]
        .as_node()
        .expect("node scores");
    let sum: f64 = pr.values().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(pr[&id("0")] > pr[&id("1")]);
}

// ===========================================================================
// Topology 4: Degenerate graphs
// ===========================================================================

#[test]
fn empty_graph_produces_empty_maps() {
    let report = compute_all(&build_graph(&[], &[], false), &NetricsConfig::default())
        .expect("nothing to iterate");
    assert_eq!(report.n_nodes, 0);
    assert_eq!(report.n_edges, 0);
    for (metric, map) in &report.metrics {
        assert!(map.is_empty(), "{metric} should be empty");
    }
}

#[test]
fn single_node_battery() {
    let report = compute_all(&build_graph(&["v"], &[], true), &NetricsConfig::default())
        .expect("single node converges");
    let node = |metric: MetricName| -> f64 {
        report.metrics[&metric].as_node().expect("node scores")[&id("v")]
    };
    assert_close(node(MetricName::DegreeCentrality), 0.0, "degree");
    assert_close(node(MetricName::ClosenessCentrality), 0.0, "closeness");
    assert_close(node(MetricName::BetweennessCentrality), 0.0, "betweenness");
    assert_close(node(MetricName::ClusteringCoefficient), 0.0, "clustering");
    assert_close(node(MetricName::PageRank), 1.0, "pagerank");

    let MetricMap::Distance(sp) = &report.metrics[&MetricName::ShortestPaths] else {
        panic!("shortest paths should be distances");
    };
    assert_eq!(sp[&id("v")][&id("v")], 0);
    assert!(report.metrics[&MetricName::EdgeBetweennessCentrality].is_empty());
}

// ===========================================================================
// Topology 5: Loaded description with mixed identifiers
//
//   {"1", "2", "x"} with 1 - 2 - x, undirected, plus a falsy node "3"
// ===========================================================================

#[test]
fn description_pipeline_normalizes_keys() {
    let description = GraphDescription::parse(
        r#"{"nodes": {"1": true, "2": true, "x": 1, "3": false},
            "adj": {"1": {"2": true}, "2": {"x": true, "3": true}},
            "undirected": true}"#,
    )
    .expect("valid description");
    let g = Graph::from_description(&description);
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);

    let map = compute(&g, MetricName::ShortestPaths, &NetricsConfig::default())
        .expect("traversal never fails");
    let sp = map.as_distances().expect("distances");
    assert_eq!(sp[&NodeId::Integer(1)][&NodeId::Text("x".to_string())], 2);

    let json = serde_json::to_value(&map).expect("serialize");
    assert_eq!(json["1"]["x"], serde_json::json!(2));
}
