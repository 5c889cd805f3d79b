//! Metric dispatch.
//!
//! [`compute`] maps one [`MetricName`] to its algorithm; [`compute_all`]
//! runs the whole battery in report order and stops at the first failure.

use std::collections::BTreeMap;
use std::time::Instant;

use netrics_core::config::NetricsConfig;
use netrics_core::{ConvergenceError, Graph, MetricMap, MetricName, MetricsReport};
use tracing::{debug, info, info_span, instrument};

use crate::betweenness::{betweenness_centrality, edge_betweenness_centrality};
use crate::closeness::closeness_centrality;
use crate::clustering::clustering_coefficient;
use crate::degree::degree_centrality;
use crate::eigenvector::eigenvector_centrality;
use crate::pagerank::pagerank;
use crate::shortest_paths::all_pairs_shortest_path_length;

/// Compute a single metric.
///
/// # Errors
///
/// Returns [`ConvergenceError`] when an iterative metric (eigenvector
/// centrality, PageRank) does not converge. Other metrics never fail.
pub fn compute(
    graph: &Graph,
    metric: MetricName,
    config: &NetricsConfig,
) -> Result<MetricMap, ConvergenceError> {
    let map = match metric {
        MetricName::BetweennessCentrality => MetricMap::Node(betweenness_centrality(graph)),
        MetricName::ClosenessCentrality => MetricMap::Node(closeness_centrality(graph)),
        MetricName::ClusteringCoefficient => MetricMap::Node(clustering_coefficient(graph)),
        MetricName::DegreeCentrality => MetricMap::Node(degree_centrality(graph)),
        MetricName::EdgeBetweennessCentrality => {
            MetricMap::Pair(edge_betweenness_centrality(graph))
        }
        MetricName::EigenvectorCentrality => MetricMap::Node(eigenvector_centrality(
            graph,
            &config.eigenvector.convergence(),
        )?),
        MetricName::PageRank => MetricMap::Node(pagerank(graph, &config.pagerank)?),
        MetricName::ShortestPaths => MetricMap::Distance(all_pairs_shortest_path_length(graph)),
    };
    Ok(map)
}

/// Compute every metric of the battery.
///
/// # Errors
///
/// Returns the first [`ConvergenceError`]; no partial report is produced.
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count(), directed = graph.is_directed()))]
pub fn compute_all(graph: &Graph, config: &NetricsConfig) -> Result<MetricsReport, ConvergenceError> {
    let start = Instant::now();
    let mut metrics = BTreeMap::new();

    for metric in MetricName::ALL {
        let _span = info_span!("metric", %metric).entered();
        let t = Instant::now();
        let map = compute(graph, metric, config)?;
        debug!(
            subjects = map.len(),
            elapsed_ms = t.elapsed().as_millis(),
            "metric computed"
        );
        metrics.insert(metric, map);
    }

    info!(
        metrics = metrics.len(),
        elapsed_ms = start.elapsed().as_millis(),
        content_hash = graph.content_hash(),
        "metric battery complete"
    );

    Ok(MetricsReport {
        is_bidirectional: !graph.is_directed(),
        n_nodes: graph.node_count(),
        n_edges: graph.edge_count(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use netrics_core::NodeId;
    use netrics_core::config::PageRankConfig;

    fn make_graph(nodes: &[&str], edges: &[(&str, &str)], directed: bool) -> Graph {
        Graph::new(
            nodes.iter().map(|n| NodeId::parse(n)),
            edges.iter().map(|(a, b)| (NodeId::parse(a), NodeId::parse(b))),
            directed,
        )
    }

    #[test]
    fn battery_covers_every_metric() {
        let g = make_graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")], false);
        let report = compute_all(&g, &NetricsConfig::default()).expect("triangle converges");
        assert_eq!(
            report.metrics.keys().copied().collect::<Vec<_>>(),
            MetricName::ALL.to_vec()
        );
        assert!(report.is_bidirectional);
        assert_eq!(report.n_nodes, 3);
        assert_eq!(report.n_edges, 3);
    }

    #[test]
    fn empty_graph_yields_empty_maps() {
        let g = make_graph(&[], &[], true);
        let report = compute_all(&g, &NetricsConfig::default()).expect("empty graph");
        assert_eq!(report.metrics.len(), MetricName::ALL.len());
        assert!(report.metrics.values().all(MetricMap::is_empty));
    }

    #[test]
    fn convergence_failure_aborts_the_run() {
        let g = make_graph(&["A", "B"], &[("A", "B"), ("B", "A")], true);
        let config = NetricsConfig {
            pagerank: PageRankConfig {
                max_iter: 0,
                ..PageRankConfig::default()
            },
            ..NetricsConfig::default()
        };
        let err = compute_all(&g, &config).expect_err("zero iterations never converge");
        assert_eq!(err.metric, MetricName::PageRank);
    }

    #[test]
    fn compute_picks_the_right_shape() {
        let g = make_graph(&["1", "2"], &[("1", "2")], true);
        let config = NetricsConfig::default();
        assert!(compute(&g, MetricName::DegreeCentrality, &config).expect("degree").as_node().is_some());
        assert!(
            compute(&g, MetricName::EdgeBetweennessCentrality, &config)
                .expect("edge betweenness")
                .as_pair()
                .is_some()
        );
        assert!(
            compute(&g, MetricName::ShortestPaths, &config)
                .expect("shortest paths")
                .as_distances()
                .is_some()
        );
    }
}
