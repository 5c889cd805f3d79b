//! Graph description loading.
//!
//! # Overview
//!
//! A graph description is the 3-tuple `(node_presence_map, adjacency_map,
//! is_bidirectional)`. It arrives in one of several JSON layouts:
//!
//! ```text
//! [{"0": true, "1": true}, {"0": {"1": true}}, true]          array
//! {"nodes": {...}, "adj": {...}, "is_bidirectional": true}     object
//! {"V": {...}, "E": {...}, "undirected": true}                 object, aliases
//! {"0": true, "1": true}                                       three lines,
//! {"0": {"1": true}}                                           one JSON value
//! true                                                         per line
//! ```
//!
//! Parsers are tried in a fixed order; the first success wins and the last
//! failure is surfaced when none succeeds.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use crate::error::FormatError;

const NODE_ALIASES: [&str; 3] = ["nodes", "V", "node_map"];
const ADJACENCY_ALIASES: [&str; 4] = ["adj", "E", "adjacency", "edge_map"];
const DIRECTEDNESS_ALIASES: [&str; 3] = ["is_bidirectional", "bidirectional", "undirected"];

type Attempt = fn(&str) -> std::result::Result<GraphDescription, String>;

/// Parsers in the order they are tried.
const ATTEMPTS: [(&str, Attempt); 2] = [
    ("flexible", parse_flexible),
    ("three-line", parse_three_lines),
];

/// Normalized graph description, before node-id normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphDescription {
    /// Raw node key → presence flag (JSON truthiness).
    pub nodes: Map<String, Value>,
    /// Raw source key → `{raw target key → edge flag}`.
    pub adjacency: Map<String, Value>,
    /// `true` for an undirected graph.
    pub is_bidirectional: bool,
}

impl GraphDescription {
    /// Parse a description from document text.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedGraphFormat`] carrying the last
    /// parser's failure when no layout matches.
    pub fn parse(content: &str) -> std::result::Result<Self, FormatError> {
        let mut last_failure = String::from("no parser attempted");

        for (name, attempt) in ATTEMPTS {
            match attempt(content) {
                Ok(description) => {
                    debug!(
                        layout = name,
                        nodes = description.nodes.len(),
                        sources = description.adjacency.len(),
                        "parsed graph description"
                    );
                    return Ok(description);
                }
                Err(reason) => {
                    trace!(layout = name, %reason, "layout rejected");
                    last_failure = format!("{name} layout: {reason}");
                }
            }
        }

        Err(FormatError::UnsupportedGraphFormat(last_failure))
    }

    /// Read and parse a description file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 or matches no
    /// recognized layout.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to load graph from {}", path.display()))
    }
}

/// JSON truthiness: `false`, `null`, zero, and empty strings, arrays and
/// objects are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn from_parts(
    nodes: Value,
    adjacency: Value,
    flag: &Value,
) -> std::result::Result<GraphDescription, String> {
    let Value::Object(nodes) = nodes else {
        return Err("node map is not a JSON object".to_string());
    };
    let Value::Object(adjacency) = adjacency else {
        return Err("adjacency map is not a JSON object".to_string());
    };
    Ok(GraphDescription {
        nodes,
        adjacency,
        is_bidirectional: is_truthy(flag),
    })
}

fn parse_flexible(content: &str) -> std::result::Result<GraphDescription, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    match value {
        Value::Array(items) if items.len() >= 3 => {
            let mut items = items.into_iter();
            let (Some(nodes), Some(adjacency), Some(flag)) =
                (items.next(), items.next(), items.next())
            else {
                return Err("array shorter than three elements".to_string());
            };
            from_parts(nodes, adjacency, &flag)
        }
        Value::Object(mut obj) => {
            let pick = |obj: &Map<String, Value>, aliases: &[&'static str]| {
                aliases.iter().copied().find(|k| obj.contains_key(*k))
            };
            let (Some(nk), Some(ak), Some(bk)) = (
                pick(&obj, &NODE_ALIASES),
                pick(&obj, &ADJACENCY_ALIASES),
                pick(&obj, &DIRECTEDNESS_ALIASES),
            ) else {
                return Err("object lacks a nodes, adjacency or directedness key".to_string());
            };
            let flag = obj.remove(bk).unwrap_or(Value::Null);
            let nodes = obj.remove(nk).unwrap_or(Value::Null);
            let adjacency = obj.remove(ak).unwrap_or(Value::Null);
            from_parts(nodes, adjacency, &flag)
        }
        _ => Err("expected a JSON array of three values or an object".to_string()),
    }
}

fn parse_three_lines(content: &str) -> std::result::Result<GraphDescription, String> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 3 {
        return Err(format!("expected 3 non-blank lines, found {}", lines.len()));
    }

    let parse = |idx: usize| {
        serde_json::from_str::<Value>(lines[idx]).map_err(|e| format!("line {}: {e}", idx + 1))
    };
    let nodes = parse(0)?;
    let adjacency = parse(1)?;
    let flag = parse(2)?;
    from_parts(nodes, adjacency, &flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_layout_with_canonical_keys() {
        let d = GraphDescription::parse(
            r#"{"nodes": {"0": true, "1": true}, "adj": {"0": {"1": true}}, "is_bidirectional": false}"#,
        )
        .expect("parse");
        assert_eq!(d.nodes.len(), 2);
        assert_eq!(d.adjacency["0"], json!({"1": true}));
        assert!(!d.is_bidirectional);
    }

    #[test]
    fn object_layout_with_aliases() {
        let d = GraphDescription::parse(r#"{"V": {"a": 1}, "E": {}, "undirected": 1}"#)
            .expect("parse");
        assert!(d.is_bidirectional);
        assert_eq!(d.nodes["a"], json!(1));

        let d = GraphDescription::parse(
            r#"{"node_map": {}, "edge_map": {}, "bidirectional": false}"#,
        )
        .expect("parse");
        assert!(!d.is_bidirectional);
    }

    #[test]
    fn array_layout() {
        let d = GraphDescription::parse(r#"[{"1": true}, {"1": {}}, true, "extra"]"#)
            .expect("parse");
        assert!(d.is_bidirectional);
        assert_eq!(d.nodes.len(), 1);
    }

    #[test]
    fn three_line_layout() {
        let d = GraphDescription::parse("{\"1\": true, \"2\": true}\n\n{\"1\": {\"2\": true}}\nfalse\n")
            .expect("parse");
        assert_eq!(d.nodes.len(), 2);
        assert!(!d.is_bidirectional);
    }

    #[test]
    fn object_missing_directedness_is_rejected() {
        let err = GraphDescription::parse(r#"{"nodes": {}, "adj": {}}"#).expect_err("no flag");
        // The flexible attempt fails first; the three-line attempt fails last.
        assert!(err.to_string().contains("three-line"), "{err}");
    }

    #[test]
    fn non_object_node_map_is_rejected() {
        let err = GraphDescription::parse(r#"[[1, 2], {}, true]"#).expect_err("array nodes");
        assert!(matches!(err, FormatError::UnsupportedGraphFormat(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(GraphDescription::parse("not json at all").is_err());
        assert!(GraphDescription::parse("").is_err());
        assert!(GraphDescription::parse("42").is_err());
    }

    #[test]
    fn truthiness_follows_json_values() {
        for falsy in [json!(false), json!(null), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("x"), json!([0]), json!({"a": 0})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("g.json");
        std::fs::write(&path, r#"[{"x": true}, {}, false]"#).expect("write");
        let d = GraphDescription::load(&path).expect("load");
        assert_eq!(d.nodes.len(), 1);
        assert!(GraphDescription::load(&dir.path().join("missing.json")).is_err());
    }
}
