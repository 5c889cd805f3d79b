#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use netrics_core::config::resolve_config;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "netrics: graph metrics battery and cross-implementation agreement reports",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./netrics.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute every metric for a graph",
        long_about = "Load a graph description, compute the full metric battery and optionally compare it with another engine's metrics document.",
        after_help = "EXAMPLES:\n    # Print metrics to stdout\n    netrics compute -i graph.json\n\n    # Save metrics and compare against another engine's output\n    netrics compute -i graph.json -o ours.json -c theirs.json -r report.json\n\n    # Include per-node errors in the report\n    netrics compute -i graph.json -c theirs.json --per-node"
    )]
    Compute(cmd::compute::ComputeArgs),

    #[command(
        about = "Compare two metrics documents",
        long_about = "Align two metrics documents key by key and report error statistics for every metric present in both.",
        after_help = "EXAMPLES:\n    # Print the report to stdout\n    netrics compare reference.json candidate.json\n\n    # Save a report with per-node detail\n    netrics compare reference.json candidate.json -r report.json --per-node"
    )]
    Compare(cmd::compare::CompareArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    netrics completions bash > /etc/bash_completion.d/netrics\n\n    # Zsh\n    netrics completions zsh > \"${fpath[1]}/_netrics\""
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NETRICS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "netrics=debug,info"
        } else {
            "netrics=info,warn"
        })
    });

    let format = env::var("NETRICS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let working_dir = env::current_dir()?;
    let config = resolve_config(cli.config.as_deref(), &working_dir)?;
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Compute(ref args) => cmd::compute::run_compute(args, &config),
        Commands::Compare(ref args) => cmd::compare::run_compare(args, &config),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::render_error(&err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_flags_match_short_forms() {
        let cli = Cli::parse_from([
            "netrics", "compute", "-i", "g.json", "-o", "m.json", "-c", "other.json", "-r",
            "report.json", "--per-node",
        ]);
        let Commands::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.input, PathBuf::from("g.json"));
        assert_eq!(args.output, Some(PathBuf::from("m.json")));
        assert_eq!(args.compare, Some(PathBuf::from("other.json")));
        assert_eq!(args.report, Some(PathBuf::from("report.json")));
        assert!(args.per_node);
    }

    #[test]
    fn report_requires_compare() {
        let res = Cli::try_parse_from(["netrics", "compute", "-i", "g.json", "-r", "report.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "netrics",
            "compare",
            "a.json",
            "b.json",
            "--config",
            "custom.toml",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Compare(_)));
    }

    #[test]
    fn compute_requires_input() {
        assert!(Cli::try_parse_from(["netrics", "compute"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
