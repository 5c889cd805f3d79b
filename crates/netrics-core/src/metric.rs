//! The fixed metric battery.
//!
//! [`MetricName`] is the single list both the metrics engine (what to
//! compute) and the comparison engine (what to compare) iterate over.
//! Variants are declared in the lexicographic order of their wire names, so
//! the derived `Ord` is also the order reports list them in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One metric of the battery, identified by its document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    BetweennessCentrality,
    ClosenessCentrality,
    ClusteringCoefficient,
    DegreeCentrality,
    EdgeBetweennessCentrality,
    EigenvectorCentrality,
    PageRank,
    ShortestPaths,
}

/// Whether a metric scores single nodes or ordered node pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Node,
    Pair,
}

impl MetricName {
    /// Every metric, in report order.
    pub const ALL: [Self; 8] = [
        Self::BetweennessCentrality,
        Self::ClosenessCentrality,
        Self::ClusteringCoefficient,
        Self::DegreeCentrality,
        Self::EdgeBetweennessCentrality,
        Self::EigenvectorCentrality,
        Self::PageRank,
        Self::ShortestPaths,
    ];

    /// Document key of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BetweennessCentrality => "betweenness_centrality",
            Self::ClosenessCentrality => "closeness_centrality",
            Self::ClusteringCoefficient => "clustering_coefficient",
            Self::DegreeCentrality => "degree_centrality",
            Self::EdgeBetweennessCentrality => "edge_betweenness_centrality",
            Self::EigenvectorCentrality => "eigenvector_centrality",
            Self::PageRank => "page_rank",
            Self::ShortestPaths => "shortest_paths",
        }
    }

    #[must_use]
    pub const fn subject(self) -> Subject {
        match self {
            Self::EdgeBetweennessCentrality | Self::ShortestPaths => Subject::Pair,
            _ => Subject::Node,
        }
    }

    /// Only power-iteration metrics can fail.
    #[must_use]
    pub const fn is_iterative(self) -> bool {
        matches!(self, Self::EigenvectorCentrality | Self::PageRank)
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no metric of the battery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric name: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricName {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}
