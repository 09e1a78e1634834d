// src/artifacts/extractor.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::copy::copy_preserving_metadata;
use crate::artifacts::events::resolve_test_binary;
use crate::config::ArtifactsSection;
use crate::errors::Result;
use crate::exec::{check, CommandSpec, ProcessBackend};

/// Source paths of the two exported executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArtifacts {
    pub test_binary: PathBuf,
    pub server_binary: PathBuf,
}

/// Builds release binaries and copies them to caller-chosen locations.
pub struct ArtifactExtractor<'a, B: ProcessBackend + ?Sized> {
    backend: &'a B,
    settings: &'a ArtifactsSection,
}

impl<'a, B: ProcessBackend + ?Sized> ArtifactExtractor<'a, B> {
    pub fn new(backend: &'a B, settings: &'a ArtifactsSection) -> Self {
        Self { backend, settings }
    }

    /// `cargo build --release`
    pub fn release_build_command(&self) -> CommandSpec {
        CommandSpec::new(&self.settings.cargo)
            .arg("build")
            .arg("--release")
            .current_dir(&self.settings.project_dir)
    }

    /// `cargo test --release --no-run --message-format=json`
    pub fn test_build_command(&self) -> CommandSpec {
        CommandSpec::new(&self.settings.cargo)
            .arg("test")
            .arg("--release")
            .arg("--no-run")
            .arg("--message-format=json")
            .current_dir(&self.settings.project_dir)
    }

    /// Fixed location of the server executable after a release build.
    pub fn server_binary_path(&self) -> PathBuf {
        self.settings.project_dir.join(&self.settings.server_binary)
    }

    /// Build, locate the library test binary in the build events, then copy
    /// both executables to the given destinations.
    pub async fn extract(
        &self,
        server_bin_out_path: &Path,
        server_tests_out_path: &Path,
    ) -> Result<ExtractedArtifacts> {
        info!(step = "release build", "building release binaries");
        check(self.backend, &self.release_build_command(), false).await?;

        info!(step = "test build", "compiling release tests without running them");
        let events = check(self.backend, &self.test_build_command(), false).await?;

        let test_binary = resolve_test_binary(&events, &self.settings.library_name)?;
        info!(path = ?test_binary, library = %self.settings.library_name, "resolved test binary");

        let server_binary = self.server_binary_path();

        let bytes = copy_preserving_metadata(&test_binary, server_tests_out_path)?;
        info!(from = ?test_binary, to = ?server_tests_out_path, bytes, "copied test binary");

        let bytes = copy_preserving_metadata(&server_binary, server_bin_out_path)?;
        info!(from = ?server_binary, to = ?server_bin_out_path, bytes, "copied server binary");

        Ok(ExtractedArtifacts {
            test_binary,
            server_binary,
        })
    }
}
