//! Metrics result documents.
//!
//! Two views of the same JSON document:
//!
//! - [`MetricsReport`] is what the metrics engine produces. It is strongly
//!   keyed by [`NodeId`] and serializes to
//!   `{"is_bidirectional", "n_nodes", "n_edges", "metrics": {...}}` with
//!   string-cast keys throughout.
//! - [`MetricSet`] is what the comparison engine consumes. Keys stay plain
//!   strings because the two sides may come from different engines with
//!   different identifier conventions; every subject maps to a number or,
//!   for pair metrics, to a nested map of numbers.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{FormatError, WriteError};
use crate::metric::MetricName;
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Produced side
// ---------------------------------------------------------------------------

/// Per-node scores.
pub type NodeScores = BTreeMap<NodeId, f64>;
/// Per-ordered-pair scores: source → target → score.
pub type PairScores = BTreeMap<NodeId, BTreeMap<NodeId, f64>>;
/// Hop distances: source → target → distance, reachable pairs only.
pub type Distances = BTreeMap<NodeId, BTreeMap<NodeId, u64>>;

/// One computed metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricMap {
    Node(NodeScores),
    Pair(PairScores),
    Distance(Distances),
}

impl MetricMap {
    /// Number of top-level subjects (nodes, or pair sources).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Node(m) => m.len(),
            Self::Pair(m) => m.len(),
            Self::Distance(m) => m.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&NodeScores> {
        match self {
            Self::Node(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_pair(&self) -> Option<&PairScores> {
        match self {
            Self::Pair(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_distances(&self) -> Option<&Distances> {
        match self {
            Self::Distance(m) => Some(m),
            _ => None,
        }
    }
}

/// Every metric computed for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub is_bidirectional: bool,
    pub n_nodes: usize,
    pub n_edges: usize,
    pub metrics: BTreeMap<MetricName, MetricMap>,
}

// ---------------------------------------------------------------------------
// Consumed side
// ---------------------------------------------------------------------------

/// Value stored under one subject key of a loaded metric.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Value(f64),
    Nested(BTreeMap<String, f64>),
}

/// Subject key → entry.
pub type MetricTable = BTreeMap<String, Entry>;

/// Loose, string-keyed view of a metrics document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    tables: BTreeMap<MetricName, MetricTable>,
}

impl MetricSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, metric: MetricName) -> Option<&MetricTable> {
        self.tables.get(&metric)
    }

    pub fn insert(&mut self, metric: MetricName, table: MetricTable) {
        self.tables.insert(metric, table);
    }

    /// Metrics present, in report order.
    pub fn names(&self) -> impl Iterator<Item = MetricName> + '_ {
        self.tables.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// String-keyed view of a freshly computed report.
    #[must_use]
    pub fn from_report(report: &MetricsReport) -> Self {
        let tables = report
            .metrics
            .iter()
            .map(|(name, map)| (*name, table_from_map(map)))
            .collect();
        Self { tables }
    }

    /// Interpret a parsed JSON document.
    ///
    /// Accepts `{"metrics": {...}}` or an object keyed directly by metric
    /// name. Unknown metric names are ignored; a known metric whose value is
    /// not an object is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedMetricsFormat`] when the document
    /// is not an object and [`FormatError::NonNumericValue`] when a known
    /// metric holds a non-numeric value.
    pub fn from_value(value: Value) -> std::result::Result<Self, FormatError> {
        let root = match value {
            Value::Object(mut obj) => match obj.remove("metrics") {
                Some(Value::Object(metrics)) => metrics,
                Some(other) => {
                    obj.insert("metrics".to_string(), other);
                    obj
                }
                None => obj,
            },
            other => {
                return Err(FormatError::UnsupportedMetricsFormat(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut set = Self::new();
        for (key, value) in root {
            let Ok(metric) = key.parse::<MetricName>() else {
                debug!(key, "ignoring unknown metric");
                continue;
            };
            let Value::Object(subjects) = value else {
                warn!(%metric, kind = json_kind(&value), "metric is not a map; skipping");
                continue;
            };
            set.insert(metric, table_from_json(metric, subjects)?);
        }
        Ok(set)
    }

    /// Parse document text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a metrics document.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("metrics document is not valid JSON")?;
        Ok(Self::from_value(value)?)
    }

    /// Read and parse a metrics document file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Unsupported metrics JSON structure in: {}", path.display()))
    }
}

/// Serialize a document with two-space indentation.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize document")
}

/// Write a document to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = to_pretty_json(value)?;
    std::fs::write(path, text).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn table_from_map(map: &MetricMap) -> MetricTable {
    match map {
        MetricMap::Node(scores) => scores
            .iter()
            .map(|(id, v)| (id.to_string(), Entry::Value(*v)))
            .collect(),
        MetricMap::Pair(pairs) => pairs
            .iter()
            .map(|(src, row)| {
                let nested = row.iter().map(|(dst, v)| (dst.to_string(), *v)).collect();
                (src.to_string(), Entry::Nested(nested))
            })
            .collect(),
        MetricMap::Distance(dists) => dists
            .iter()
            .map(|(src, row)| {
                let nested = row
                    .iter()
                    .map(|(dst, d)| (dst.to_string(), *d as f64))
                    .collect();
                (src.to_string(), Entry::Nested(nested))
            })
            .collect(),
    }
}

fn table_from_json(
    metric: MetricName,
    subjects: serde_json::Map<String, Value>,
) -> std::result::Result<MetricTable, FormatError> {
    let non_numeric = |key: String| FormatError::NonNumericValue { metric, key };

    let mut table = MetricTable::new();
    for (key, value) in subjects {
        let entry = match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) => Entry::Value(v),
                None => return Err(non_numeric(key)),
            },
            Value::Object(inner) => {
                let mut nested = BTreeMap::new();
                for (inner_key, inner_value) in inner {
                    match inner_value.as_f64() {
                        Some(v) => {
                            nested.insert(inner_key, v);
                        }
                        None => return Err(non_numeric(format!("({key}, {inner_key})"))),
                    }
                }
                Entry::Nested(nested)
            }
            _ => return Err(non_numeric(key)),
        };
        table.insert(key, entry);
    }
    Ok(table)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
