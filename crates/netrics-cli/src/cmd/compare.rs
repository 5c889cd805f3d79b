use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use netrics_compare::{CompareOptions, compare_metrics};
use netrics_core::MetricSet;
use netrics_core::config::{CompareConfig, NetricsConfig};
use tracing::info;

use crate::output;

/// Arguments for `netrics compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference metrics document.
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Candidate metrics document.
    #[arg(value_name = "CANDIDATE")]
    pub candidate: PathBuf,

    /// Where to save the comparison report (stdout when omitted).
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Include per-node errors in the comparison report.
    #[arg(long)]
    pub per_node: bool,
}

/// Comparison options from config, with `--per-node` forcing the breakdown.
#[must_use]
pub fn compare_options(config: &CompareConfig, per_node: bool) -> CompareOptions {
    let mut options = CompareOptions::from(config);
    options.include_per_node |= per_node;
    options
}

/// Compare two existing metrics documents.
///
/// # Errors
///
/// Returns an error if either document cannot be loaded or the report
/// cannot be written.
pub fn run_compare(args: &CompareArgs, config: &NetricsConfig) -> Result<()> {
    let reference = MetricSet::load(&args.reference).context("[compare] Failed to load reference metrics")?;
    let candidate = MetricSet::load(&args.candidate).context("[compare] Failed to load comparison metrics")?;
    info!(
        reference = reference.len(),
        candidate = candidate.len(),
        "metrics documents loaded"
    );

    let report = compare_metrics(
        &reference,
        &candidate,
        &compare_options(&config.compare, args.per_node),
    );
    output::emit_document(&report, args.report.as_deref(), "comparison report")
}
