// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running external commands using
//! `tokio::process::Command`, capturing their output and mirroring it to the
//! console and the session log.
//!
//! - [`command`] defines the immutable [`CommandSpec`].
//! - [`runner`] owns the read-until-EOF-and-exit loop plus the `check` /
//!   `call` / `probe` variants.
//! - [`session_log`] holds the output sinks.
//! - [`backend`] provides the `ProcessBackend` trait and a concrete
//!   `RealProcessBackend` used in production, and which tests can replace
//!   with a fake implementation.

pub mod backend;
pub mod command;
pub mod runner;
pub mod session_log;

pub use backend::{BackgroundProcess, BoxFuture, ProcessBackend, RealProcessBackend};
pub use command::CommandSpec;
pub use runner::{call, check, probe, run_process, RunOutput};
pub use session_log::{ConsoleSink, LineSink, SessionLog};
