//! Error taxonomy shared by every netrics crate.
//!
//! Two failure kinds are typed: [`FormatError`] (an input document matches no
//! recognized shape) and [`ConvergenceError`] (a power iteration ran out of
//! iterations). Both, plus [`WriteError`] for output files, map to a stable
//! [`ErrorCode`] so the binary can print a machine-parsable code plus a
//! remediation hint.
//!
//! A metric present on only one side of a comparison is not an error at all;
//! the comparison engine skips it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::metric::MetricName;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnsupportedGraphFormat,
    UnsupportedMetricsFormat,
    NonNumericMetricValue,
    ConfigParseError,
    ConvergenceFailed,
    InputReadFailed,
    OutputWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnsupportedGraphFormat => "E1001",
            Self::UnsupportedMetricsFormat => "E1002",
            Self::NonNumericMetricValue => "E1003",
            Self::ConfigParseError => "E1004",
            Self::ConvergenceFailed => "E2001",
            Self::InputReadFailed => "E5001",
            Self::OutputWriteFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnsupportedGraphFormat => "Unsupported graph description format",
            Self::UnsupportedMetricsFormat => "Unsupported metrics document format",
            Self::NonNumericMetricValue => "Non-numeric metric value",
            Self::ConfigParseError => "Config file parse error",
            Self::ConvergenceFailed => "Power iteration did not converge",
            Self::InputReadFailed => "Input file read failed",
            Self::OutputWriteFailed => "Output file write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::UnsupportedGraphFormat => Some(
                "Supply either 3-line JSON (nodes, adj, is_bidirectional) or a single JSON array/object with those fields.",
            ),
            Self::UnsupportedMetricsFormat => {
                Some("Supply {\"metrics\": {...}} or an object keyed by metric name.")
            }
            Self::NonNumericMetricValue => {
                Some("Every value in a compared metric must be a number or a map of numbers.")
            }
            Self::ConfigParseError => Some("Fix syntax in netrics.toml and retry."),
            Self::ConvergenceFailed => Some(
                "Raise max_iter or loosen tolerance in the [pagerank]/[eigenvector] config sections.",
            ),
            Self::InputReadFailed => Some("Check that the path exists and is readable UTF-8."),
            Self::OutputWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An input document does not match any recognized shape.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No graph-description parser accepted the input; carries the last
    /// attempt's failure.
    #[error("unsupported graph description: {0}")]
    UnsupportedGraphFormat(String),

    /// The metrics document is not a JSON object.
    #[error("unsupported metrics JSON structure: {0}")]
    UnsupportedMetricsFormat(String),

    /// A compared metric holds something other than a number (or a map of
    /// numbers for pair metrics).
    #[error("metric {metric}: value for {key:?} is not numeric")]
    NonNumericValue { metric: MetricName, key: String },
}

impl FormatError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedGraphFormat(_) => ErrorCode::UnsupportedGraphFormat,
            Self::UnsupportedMetricsFormat(_) => ErrorCode::UnsupportedMetricsFormat,
            Self::NonNumericValue { .. } => ErrorCode::NonNumericMetricValue,
        }
    }
}

/// A power iteration hit its iteration cap before the L1 delta dropped under
/// the tolerance.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "{metric} did not converge within {iterations} iterations (last L1 delta {delta:e}, tolerance {tolerance:e})"
)]
pub struct ConvergenceError {
    pub metric: MetricName,
    pub iterations: usize,
    pub delta: f64,
    pub tolerance: f64,
}

impl ConvergenceError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConvergenceFailed
    }
}

/// An output document could not be written.
#[derive(Debug, Error)]
#[error("failed to write {}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl WriteError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::OutputWriteFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::UnsupportedGraphFormat,
        ErrorCode::UnsupportedMetricsFormat,
        ErrorCode::NonNumericMetricValue,
        ErrorCode::ConfigParseError,
        ErrorCode::ConvergenceFailed,
        ErrorCode::InputReadFailed,
        ErrorCode::OutputWriteFailed,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn convergence_error_names_metric_and_iterations() {
        let err = ConvergenceError {
            metric: MetricName::PageRank,
            iterations: 100,
            delta: 3.5e-7,
            tolerance: 1e-8,
        };
        let msg = err.to_string();
        assert!(msg.contains("page_rank"), "{msg}");
        assert!(msg.contains("100 iterations"), "{msg}");
        assert_eq!(err.code(), ErrorCode::ConvergenceFailed);
    }

    #[test]
    fn format_error_maps_to_code() {
        let err = FormatError::NonNumericValue {
            metric: MetricName::DegreeCentrality,
            key: "7".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::NonNumericMetricValue);
        assert!(err.to_string().contains("degree_centrality"));
    }
}
