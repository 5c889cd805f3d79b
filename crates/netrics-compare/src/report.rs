//! Comparison reports.
//!
//! ```text
//! {
//!   "metrics_compared": ["betweenness_centrality", ...],
//!   "betweenness_centrality": {
//!     "n_ref": .., "n_cmp": .., "n_common": ..,
//!     "missing_in_compare": [..], "missing_in_reference": [..],
//!     "mae": .., "rmse": .., "max_abs_error": .., "max_abs_error_node": ..,
//!     "mape": .., "mean_signed_error": .., "l1_error": .., "l2_error": ..,
//!     "per_node": null | {"<key>": {"ref", "cmp", "abs_error", "signed_error"}}
//!   },
//!   ...
//! }
//! ```

use std::collections::BTreeMap;

use netrics_core::config::CompareConfig;
use netrics_core::{MetricName, MetricSet, MetricTable};
use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument};

use crate::align::Alignment;
use crate::stats::{ErrorAccumulator, ErrorSummary};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Keep a per-subject breakdown in every entry.
    pub include_per_node: bool,
    /// Floor for `|reference|` in relative errors.
    pub epsilon: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::from(&CompareConfig::default())
    }
}

impl From<&CompareConfig> for CompareOptions {
    fn from(config: &CompareConfig) -> Self {
        Self {
            include_per_node: config.per_node,
            epsilon: config.epsilon,
        }
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Error detail for one common key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectError {
    #[serde(rename = "ref")]
    pub reference: f64,
    #[serde(rename = "cmp")]
    pub candidate: f64,
    pub abs_error: f64,
    pub signed_error: f64,
}

/// Per-subject breakdown, kept in alignment order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerSubject(pub Vec<(String, SubjectError)>);

impl PerSubject {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SubjectError> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }
}

impl Serialize for PerSubject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Agreement between both sides of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub n_ref: usize,
    pub n_cmp: usize,
    pub n_common: usize,
    pub missing_in_compare: Vec<String>,
    pub missing_in_reference: Vec<String>,
    #[serde(flatten)]
    pub summary: ErrorSummary,
    pub per_node: Option<PerSubject>,
}

/// One entry per metric present on both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Compared metrics, in report order.
    pub metrics_compared: Vec<MetricName>,
    #[serde(flatten)]
    pub entries: BTreeMap<MetricName, MetricComparison>,
}

impl ComparisonReport {
    #[must_use]
    pub fn get(&self, metric: MetricName) -> Option<&MetricComparison> {
        self.entries.get(&metric)
    }

    /// Largest `max_abs_error` across every compared metric.
    #[must_use]
    pub fn worst(&self) -> Option<(MetricName, &MetricComparison)> {
        self.entries
            .iter()
            .filter(|(_, c)| c.n_common > 0)
            .max_by(|(_, a), (_, b)| a.summary.max_abs_error.total_cmp(&b.summary.max_abs_error))
            .map(|(name, c)| (*name, c))
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare one metric's reference and candidate tables.
#[must_use]
pub fn compare_tables(
    reference: &MetricTable,
    candidate: &MetricTable,
    options: &CompareOptions,
) -> MetricComparison {
    let alignment = Alignment::new(reference, candidate);
    let mut acc = ErrorAccumulator::new(options.epsilon);
    let mut per_node = Vec::new();

    for (key, r, c) in alignment.pairs() {
        let (abs_error, signed_error) = acc.push(key, r, c);
        if options.include_per_node {
            per_node.push((
                key.to_string(),
                SubjectError {
                    reference: r,
                    candidate: c,
                    abs_error,
                    signed_error,
                },
            ));
        }
    }

    MetricComparison {
        n_ref: alignment.reference.len(),
        n_cmp: alignment.candidate.len(),
        n_common: alignment.common.len(),
        missing_in_compare: alignment.missing_in_compare,
        missing_in_reference: alignment.missing_in_reference,
        summary: acc.finish(),
        per_node: options.include_per_node.then_some(PerSubject(per_node)),
    }
}

/// Compare every metric present in both documents.
#[must_use]
#[instrument(skip_all, fields(reference = reference.len(), candidate = candidate.len()))]
pub fn compare_metrics(
    reference: &MetricSet,
    candidate: &MetricSet,
    options: &CompareOptions,
) -> ComparisonReport {
    let mut report = ComparisonReport::default();

    for metric in MetricName::ALL {
        let (Some(r), Some(c)) = (reference.get(metric), candidate.get(metric)) else {
            debug!(%metric, "metric not on both sides; skipping");
            continue;
        };
        let entry = compare_tables(r, c, options);
        debug!(
            %metric,
            n_common = entry.n_common,
            mae = entry.summary.mae,
            max_abs_error = entry.summary.max_abs_error,
            "metric compared"
        );
        report.metrics_compared.push(metric);
        report.entries.insert(metric, entry);
    }

    info!(metrics = report.metrics_compared.len(), "comparison complete");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use netrics_core::Entry;

    fn table(entries: &[(&str, f64)]) -> MetricTable {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), Entry::Value(*v)))
            .collect()
    }

    #[test]
    fn disjoint_keys_yield_zero_statistics() {
        let c = compare_tables(
            &table(&[("1", 0.5)]),
            &table(&[("2", 0.5)]),
            &CompareOptions::default(),
        );
        assert_eq!(c.n_common, 0);
        assert_eq!(c.summary, ErrorSummary::default());
        assert_eq!(c.missing_in_compare, vec!["1"]);
        assert_eq!(c.missing_in_reference, vec!["2"]);
        assert!(c.per_node.is_none());
    }

    #[test]
    fn per_node_follows_key_order() {
        let options = CompareOptions {
            include_per_node: true,
            ..CompareOptions::default()
        };
        let c = compare_tables(
            &table(&[("10", 1.0), ("9", 1.0), ("a", 2.0)]),
            &table(&[("10", 1.5), ("9", 1.0), ("a", 1.0)]),
            &options,
        );
        let per_node = c.per_node.expect("requested");
        let keys: Vec<&str> = per_node.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["9", "a", "10"]);
        let a = per_node.get("a").expect("a");
        assert!((a.signed_error + 1.0).abs() < 1e-12);
        assert!((a.abs_error - 1.0).abs() < 1e-12);
        assert_eq!(c.summary.max_abs_error_node.as_deref(), Some("a"));
    }

    #[test]
    fn metrics_on_one_side_are_skipped() {
        let mut reference = MetricSet::new();
        reference.insert(MetricName::PageRank, table(&[("1", 1.0)]));
        reference.insert(MetricName::DegreeCentrality, table(&[("1", 0.0)]));
        let mut candidate = MetricSet::new();
        candidate.insert(MetricName::PageRank, table(&[("1", 1.0)]));
        candidate.insert(MetricName::ClosenessCentrality, table(&[("1", 0.0)]));

        let report = compare_metrics(&reference, &candidate, &CompareOptions::default());
        assert_eq!(report.metrics_compared, vec![MetricName::PageRank]);
        assert!(report.get(MetricName::DegreeCentrality).is_none());
        assert_eq!(report.worst().map(|(m, _)| m), Some(MetricName::PageRank));
    }
}
