//! Document output and error rendering.
//!
//! Documents go to stdout, or to a file followed by a one-line
//! `Saved <what> to: <path>` notice. Errors go to stderr as
//! `error[E####]: <summary>: <cause chain>` plus an optional hint line.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use netrics_core::document::{to_pretty_json, write_document};
use netrics_core::{ConvergenceError, ErrorCode, FormatError, WriteError};
use serde::Serialize;

/// Write `value` to `path`, or pretty-print it to stdout when `path` is
/// `None`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn emit_document<T: Serialize>(value: &T, path: Option<&Path>, what: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match path {
        Some(path) => {
            write_document(path, value)?;
            writeln!(out, "Saved {what} to: {}", path.display())?;
        }
        None => {
            writeln!(out, "{}", to_pretty_json(value)?)?;
        }
    }
    Ok(())
}

/// Map an error chain to the most specific [`ErrorCode`] found in it.
#[must_use]
pub fn classify(err: &anyhow::Error) -> ErrorCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<WriteError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<FormatError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<ConvergenceError>() {
            return e.code();
        }
        if cause.is::<toml::de::Error>() {
            return ErrorCode::ConfigParseError;
        }
        if cause.is::<serde_json::Error>() {
            return ErrorCode::UnsupportedMetricsFormat;
        }
        if cause.is::<io::Error>() {
            return ErrorCode::InputReadFailed;
        }
    }
    ErrorCode::InternalUnexpected
}

/// Render a failed command to stderr.
pub fn render_error(err: &anyhow::Error) {
    let code = classify(err);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "error[{code}]: {}: {err:#}", code.message());
    if let Some(hint) = code.hint() {
        let _ = writeln!(out, "  hint: {hint}");
    }
}
