// src/errors.rs

//! Crate-wide error type and result alias.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevtoolsError {
    /// `output` holds every line the command wrote, stdout and stderr merged.
    #[error("command `{command}` failed with exit code {exit_code}")]
    ProcessFailed {
        command: String,
        exit_code: i32,
        output: Vec<String>,
    },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "no test binary of library '{library}' found among {scanned_lines} lines of build output"
    )]
    ArtifactNotFound { library: String, scanned_lines: usize },

    #[error("expected a directory but found something else at {0:?}")]
    WorkspaceConflict(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DevtoolsError {
    /// Process exit code a binary should terminate with for this error.
    ///
    /// A failed subprocess propagates its own exit code when it fits into the
    /// portable `1..=255` range; everything else maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            DevtoolsError::ProcessFailed { exit_code, .. } if (1..=255).contains(exit_code) => {
                *exit_code
            }
            _ => 1,
        }
    }
}

/// Print `err` for the operator as `<program> error: <err>`.
///
/// A failed subprocess's captured output is written first, so the reason for
/// the failure stays visible even when nothing was echoed while it ran.
pub fn write_report<W: Write>(
    err: &DevtoolsError,
    program: &str,
    out: &mut W,
) -> std::io::Result<()> {
    if let DevtoolsError::ProcessFailed { output, .. } = err {
        for line in output {
            writeln!(out, "{line}")?;
        }
    }
    writeln!(out, "{program} error: {err}")?;
    out.flush()
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DevtoolsError>;
