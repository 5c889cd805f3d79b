use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convergence::Convergence;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "netrics.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetricsConfig {
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
    #[serde(default)]
    pub compare: CompareConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting.
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_pagerank_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_pagerank_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

impl PageRankConfig {
    #[must_use]
    pub const fn convergence(&self) -> Convergence {
        Convergence {
            tolerance: self.tolerance,
            max_iter: self.max_iter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    #[serde(default = "default_eigenvector_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            tolerance: default_eigenvector_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

impl EigenvectorConfig {
    #[must_use]
    pub const fn convergence(&self) -> Convergence {
        Convergence {
            tolerance: self.tolerance,
            max_iter: self.max_iter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Include the per-subject breakdown in every report.
    #[serde(default)]
    pub per_node: bool,
    /// Floor for `|reference|` in the relative-error denominator.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            per_node: false,
            epsilon: default_epsilon(),
        }
    }
}

/// Parse a config file. A missing file is an error here; use
/// [`resolve_config`] for the optional lookup chain.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`NetricsConfig`].
pub fn load_config_file(path: &Path) -> Result<NetricsConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<NetricsConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Candidate config locations, highest precedence first.
#[must_use]
pub fn config_candidates(explicit: Option<&Path>, working_dir: &Path) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut candidates = vec![working_dir.join(PROJECT_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("netrics/config.toml"));
    }
    candidates
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Otherwise the first existing file among
/// `./netrics.toml` and `<config_dir>/netrics/config.toml` wins, and
/// defaults apply when neither exists.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>, working_dir: &Path) -> Result<NetricsConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    for candidate in config_candidates(None, working_dir) {
        if candidate.exists() {
            debug!(path = %candidate.display(), "loading config");
            return load_config_file(&candidate);
        }
    }

    Ok(NetricsConfig::default())
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_pagerank_tolerance() -> f64 {
    Convergence::PAGERANK.tolerance
}

const fn default_eigenvector_tolerance() -> f64 {
    Convergence::EIGENVECTOR.tolerance
}

const fn default_max_iter() -> usize {
    100
}

const fn default_epsilon() -> f64 {
    1e-15
}
