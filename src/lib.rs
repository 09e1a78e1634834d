// src/lib.rs

pub mod artifacts;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;

use tracing::info;

use crate::artifacts::{ArtifactExtractor, ExtractedArtifacts};
use crate::bootstrap::{BootstrapOptions, Bootstrapper, SessionWorkspace};
use crate::cli::{BootstrapArgs, ExtractArgs};
use crate::config::load_or_default;
use crate::errors::Result;
use crate::exec::RealProcessBackend;

/// Entry point of `build-release-binaries`.
pub async fn run_extract(args: ExtractArgs) -> Result<ExtractedArtifacts> {
    let cfg = load_or_default(args.config.as_deref())?;

    let backend = RealProcessBackend::new();
    let extractor = ArtifactExtractor::new(&backend, &cfg.artifacts);
    extractor
        .extract(&args.server_bin_out_path, &args.server_tests_out_path)
        .await
}

/// Entry point of `init-test-env`.
///
/// This wires together:
/// - settings loading
/// - the session workspace (step 1) and its log file
/// - the real process backend bound to that log
/// - the bootstrap state machine
pub async fn run_bootstrap(args: BootstrapArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;

    let workspace = SessionWorkspace::from_settings(&cfg.test_env)?;
    info!(step = "workspace", root = ?workspace.root(), "ensuring session workspace");
    workspace.prepare()?;
    let log = workspace.open_session_log()?;
    info!(path = ?log.path(), offline_mode = args.offline_mode, "session log opened");

    let backend = RealProcessBackend::with_session_log(log);
    let options = BootstrapOptions {
        vk_server_token: args.vk_server_token,
        offline_mode: args.offline_mode,
    };

    Bootstrapper::new(&backend, &cfg.test_env, &workspace, options)
        .run_prepared()
        .await?;

    info!("finishing");
    Ok(())
}
