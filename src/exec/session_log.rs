// src/exec/session_log.rs

//! Output sinks for subprocess lines.
//!
//! The runner hands every line it reads to each active [`LineSink`]. Two
//! sinks exist: [`ConsoleSink`] for live feedback and [`SessionLog`] for the
//! durable per-session log file.

use std::fs::{File, OpenOptions};
use std::io::{Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context};

use crate::errors::Result;
use crate::exec::command::CommandSpec;

/// A consumer of subprocess output lines.
pub trait LineSink: Send {
    fn on_line(&mut self, line: &str) -> Result<()>;
}

/// Writes each line to the console (stdout unless told otherwise) and
/// flushes immediately.
#[derive(Debug)]
pub struct ConsoleSink<W = Stdout> {
    out: W,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> LineSink for ConsoleSink<W> {
    fn on_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Append-only log file shared by every subprocess of one session.
///
/// Cloning is cheap and all clones write to the same open file.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl SessionLog {
    /// Open (or create) the log file in append mode.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening session log {:?}", path))?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header that precedes the output of `cmd`.
    pub fn record_command(&self, cmd: &CommandSpec) -> Result<()> {
        let mut file = self.lock()?;
        writeln!(file, "### Executing cmd: {cmd}")?;
        file.flush()?;
        Ok(())
    }

    /// A second handle to the underlying file, for redirecting a child's
    /// stdout/stderr into the log directly.
    pub fn try_clone_file(&self) -> Result<File> {
        let file = self.lock()?;
        let clone = file
            .try_clone()
            .with_context(|| format!("duplicating handle of session log {:?}", self.path))?;
        Ok(clone)
    }

    fn lock(&self) -> Result<MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| anyhow!("session log {:?} mutex poisoned", self.path).into())
    }
}

impl LineSink for SessionLog {
    fn on_line(&mut self, line: &str) -> Result<()> {
        let mut file = self.lock()?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
