#![forbid(unsafe_code)]
//! netrics-compare library.
//!
//! # Overview
//!
//! Measures how closely a candidate metrics document agrees with a
//! reference one:
//!
//! 1. **Alignment** (`align`): both sides are flattened to string keys
//!    (pair metrics become `"(source, target)"`) and split into common and
//!    missing key sets.
//! 2. **Statistics** (`stats`): error aggregates over the common keys.
//! 3. **Report** (`report`): one [`MetricComparison`] per metric present on
//!    both sides, in [`MetricName`] order.
//!
//! Nothing here fails: metrics missing from either side are skipped.
//!
//! [`MetricName`]: netrics_core::MetricName

pub mod align;
pub mod report;
pub mod stats;

pub use align::Alignment;
pub use report::{CompareOptions, ComparisonReport, MetricComparison, compare_metrics, compare_tables};
pub use stats::ErrorSummary;
