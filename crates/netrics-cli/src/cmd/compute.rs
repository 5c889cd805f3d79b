use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use netrics_compare::compare_metrics;
use netrics_core::config::NetricsConfig;
use netrics_core::{Graph, GraphDescription, MetricSet};
use netrics_metrics::compute_all;
use tracing::{info, warn};

use crate::cmd::compare::compare_options;
use crate::output;

/// Arguments for `netrics compute`.
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Input graph description file.
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Where to save the computed metrics (stdout when omitted).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Metrics document to compare the computed metrics against.
    #[arg(short, long, value_name = "PATH")]
    pub compare: Option<PathBuf>,

    /// Where to save the comparison report (stdout when omitted).
    #[arg(short, long, value_name = "PATH", requires = "compare")]
    pub report: Option<PathBuf>,

    /// Include per-node errors in the comparison report.
    #[arg(long)]
    pub per_node: bool,
}

/// Compute every metric for a graph and optionally compare the result with
/// another engine's output.
///
/// # Errors
///
/// Returns an error if the graph cannot be loaded, a power iteration does
/// not converge, the comparison document cannot be loaded, or an output
/// cannot be written.
pub fn run_compute(args: &ComputeArgs, config: &NetricsConfig) -> Result<()> {
    let description = GraphDescription::load(&args.input)?;
    let graph = Graph::from_description(&description);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );

    let report = compute_all(&graph, config)
        .with_context(|| format!("Failed to compute metrics for {}", args.input.display()))?;
    output::emit_document(&report, args.output.as_deref(), "metrics")?;

    let Some(compare_path) = &args.compare else {
        if args.per_node {
            warn!("--per-node has no effect without --compare");
        }
        return Ok(());
    };

    let candidate =
        MetricSet::load(compare_path).context("[compare] Failed to load comparison metrics")?;
    let reference = MetricSet::from_report(&report);
    let comparison = compare_metrics(
        &reference,
        &candidate,
        &compare_options(&config.compare, args.per_node),
    );
    output::emit_document(&comparison, args.report.as_deref(), "comparison report")
}
