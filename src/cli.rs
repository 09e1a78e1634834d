// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Each binary owns one argument struct; both share [`LogLevel`] and the
//! optional `--config` override.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `build-release-binaries`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "build-release-binaries",
    version,
    about = "Build release binaries and export the server binary and its test binary.",
    long_about = None
)]
pub struct ExtractArgs {
    /// Destination path for the server executable.
    #[arg(long, value_name = "PATH")]
    pub server_bin_out_path: PathBuf,

    /// Destination path for the compiled library test binary.
    #[arg(long, value_name = "PATH")]
    pub server_tests_out_path: PathBuf,

    /// Optional TOML file overriding the built-in settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEVTOOLS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Command-line arguments for `init-test-env`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "init-test-env",
    version,
    about = "Provision a local database container and a testing config for server tests.",
    long_about = None
)]
pub struct BootstrapArgs {
    /// Service token written into the generated testing config.
    #[arg(long, value_name = "TOKEN")]
    pub vk_server_token: String,

    /// With this option set, non-essential operations that require network
    /// will not fail the run.
    #[arg(long)]
    pub offline_mode: bool,

    /// Optional TOML file overriding the built-in settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEVTOOLS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
