#![forbid(unsafe_code)]
//! netrics-core library.
//!
//! Shared vocabulary of the netrics workspace: node identifiers, the
//! immutable graph model and its loader, the fixed metric battery, result
//! documents, the power-iteration convergence contract and configuration.
//!
//! # Conventions
//!
//! - **Errors**: typed errors in [`error`]; `anyhow::Result` wherever a
//!   filesystem path is involved.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod convergence;
pub mod document;
pub mod error;
pub mod graph;
pub mod metric;
pub mod node;

pub use convergence::Convergence;
pub use document::{Entry, MetricMap, MetricSet, MetricTable, MetricsReport};
pub use error::{ConvergenceError, ErrorCode, FormatError, WriteError};
pub use graph::{Graph, GraphDescription};
pub use metric::MetricName;
pub use node::NodeId;
