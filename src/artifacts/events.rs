// src/artifacts/events.rs

//! Build events from `cargo --message-format=json` and test-binary resolution.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{DevtoolsError, Result};

/// One JSON record from the build event stream.
///
/// Only the fields used for artifact resolution are modelled; everything is
/// optional so unrelated record kinds still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildEvent {
    #[serde(default)]
    pub profile: Option<ArtifactProfile>,

    #[serde(default)]
    pub filenames: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactProfile {
    #[serde(default)]
    pub test: bool,
}

impl BuildEvent {
    pub fn is_test_artifact(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.test)
    }

    pub fn first_filename(&self) -> Option<&PathBuf> {
        self.filenames.first()
    }
}

/// Find the test binary of `library` in the raw build output.
///
/// A line is a candidate when its raw text contains `library`. This is a
/// substring match, so any record that merely mentions the name qualifies.
/// Candidates that are not JSON are skipped. The first candidate whose
/// `profile.test` is set and which lists at least one file wins, and its first
/// file is returned.
pub fn find_test_binary<S: AsRef<str>>(lines: &[S], library: &str) -> Option<PathBuf> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| line.contains(library))
        .find_map(|line| {
            let event: BuildEvent = match serde_json::from_str(line.trim()) {
                Ok(event) => event,
                Err(err) => {
                    debug!(error = %err, line, "skipping non-JSON candidate line");
                    return None;
                }
            };
            if !event.is_test_artifact() {
                return None;
            }
            let path = event.first_filename().cloned();
            if path.is_none() {
                debug!(line, "test artifact without filenames; skipping");
            }
            path
        })
}

/// Like [`find_test_binary`], failing with [`DevtoolsError::ArtifactNotFound`]
/// when nothing qualifies.
pub fn resolve_test_binary<S: AsRef<str>>(lines: &[S], library: &str) -> Result<PathBuf> {
    find_test_binary(lines, library).ok_or_else(|| DevtoolsError::ArtifactNotFound {
        library: library.to_string(),
        scanned_lines: lines.len(),
    })
}
