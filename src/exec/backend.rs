// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! Workflows talk to a `ProcessBackend` instead of spawning processes
//! directly. This makes it easy to swap in a scripted fake in tests while
//! keeping the production implementation in [`RealProcessBackend`].
//!
//! - `RealProcessBackend` spawns OS processes via `tokio::process` and mirrors
//!   their output into the session log, when one is attached.
//! - Tests can provide their own `ProcessBackend` that records which commands
//!   were issued and replays canned output.

use std::future::Future;
use std::io::IsTerminal;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Child;
use tracing::{debug, info};

use crate::errors::{DevtoolsError, Result};
use crate::exec::command::CommandSpec;
use crate::exec::runner::{build_command, run_process, RunOutput};
use crate::exec::session_log::{ConsoleSink, LineSink, SessionLog};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstracting how commands are executed.
pub trait ProcessBackend: Send + Sync {
    /// Run `cmd` to completion and capture its merged output.
    ///
    /// Only failure to launch or read the process is an error here; the exit
    /// code is reported in [`RunOutput`] and interpreted by the caller.
    fn execute<'a>(&'a self, cmd: &'a CommandSpec, echo: bool) -> BoxFuture<'a, Result<RunOutput>>;

    /// Launch `cmd` without waiting for it.
    fn spawn_background(&self, cmd: &CommandSpec) -> Result<Box<dyn BackgroundProcess>>;

    /// Whether a launched service can be attached to the operator's terminal.
    fn interactive(&self) -> bool {
        false
    }
}

/// Handle on a process started by [`ProcessBackend::spawn_background`].
pub trait BackgroundProcess: Send {
    /// Block until the process exits and return its exit code (`-1` when it
    /// was killed by a signal).
    fn wait(&mut self) -> BoxFuture<'_, Result<i32>>;
}

/// Real process backend used in production.
#[derive(Debug, Clone, Default)]
pub struct RealProcessBackend {
    session_log: Option<SessionLog>,
}

impl RealProcessBackend {
    /// Backend that only echoes to the console, without a log file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend mirroring every command and output line into `log`.
    pub fn with_session_log(log: SessionLog) -> Self {
        Self {
            session_log: Some(log),
        }
    }
}

impl ProcessBackend for RealProcessBackend {
    fn execute<'a>(&'a self, cmd: &'a CommandSpec, echo: bool) -> BoxFuture<'a, Result<RunOutput>> {
        // Each invocation gets its own handle so the future owns its sinks.
        let mut log = self.session_log.clone();

        Box::pin(async move {
            if let Some(log) = &log {
                log.record_command(cmd)?;
            }

            let mut console = ConsoleSink::stdout();
            let mut sinks: Vec<&mut dyn LineSink> = Vec::with_capacity(2);
            if echo {
                sinks.push(&mut console);
            }
            if let Some(log) = log.as_mut() {
                sinks.push(log);
            }

            run_process(cmd, &mut sinks).await
        })
    }

    fn spawn_background(&self, cmd: &CommandSpec) -> Result<Box<dyn BackgroundProcess>> {
        let mut command = build_command(cmd);

        match &self.session_log {
            Some(log) => {
                log.record_command(cmd)?;
                command
                    .stdout(Stdio::from(log.try_clone_file()?))
                    .stderr(Stdio::from(log.try_clone_file()?));
            }
            None => {
                command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
        }

        let child = command.spawn().map_err(|source| DevtoolsError::Spawn {
            command: cmd.to_string(),
            source,
        })?;

        info!(cmd = %cmd, pid = ?child.id(), "started background process");

        Ok(Box::new(SpawnedProcess {
            command: cmd.to_string(),
            child,
        }))
    }

    fn interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }
}

/// A live child process owned by [`RealProcessBackend`].
struct SpawnedProcess {
    command: String,
    child: Child,
}

impl BackgroundProcess for SpawnedProcess {
    fn wait(&mut self) -> BoxFuture<'_, Result<i32>> {
        Box::pin(async move {
            debug!(cmd = %self.command, "waiting for background process");
            let status = self.child.wait().await?;
            Ok(status.code().unwrap_or(-1))
        })
    }
}
