// src/exec/runner.rs

//! Running a single external command to completion.
//!
//! [`run_process`] is the primitive: spawn, read merged stdout/stderr line by
//! line, fan each line out to the sinks, then reap the child. The three
//! workflow-facing variants ([`check`], [`call`], [`probe`]) differ only in how
//! a non-zero exit code is treated.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{DevtoolsError, Result};
use crate::exec::backend::ProcessBackend;
use crate::exec::command::CommandSpec;
use crate::exec::session_log::LineSink;

/// Exit code plus every line the process wrote, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub lines: Vec<String>,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Build the `tokio` command for `cmd` without configuring stdio.
pub(crate) fn build_command(cmd: &CommandSpec) -> Command {
    let mut command = Command::new(cmd.program());
    command.args(cmd.args());
    if let Some(dir) = cmd.working_dir() {
        command.current_dir(dir);
    }
    command
}

/// Spawn `cmd` and read its output until both pipes reach EOF, then wait for
/// the exit status.
///
/// stdout and stderr are merged into one sequence of lines. Every line is
/// passed to each sink as soon as it is read. Bytes that are not valid UTF-8
/// are replaced with U+FFFD rather than failing the run.
pub async fn run_process(
    cmd: &CommandSpec,
    sinks: &mut [&mut dyn LineSink],
) -> Result<RunOutput> {
    debug!(cmd = %cmd, "spawning process");

    let mut command = build_command(cmd);
    command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|source| DevtoolsError::Spawn {
        command: cmd.to_string(),
        source,
    })?;

    let mut lines = Vec::new();
    let mut stdout = child.stdout.take().map(PipeLines::new);
    let mut stderr = child.stderr.take().map(PipeLines::new);

    while stdout.is_some() || stderr.is_some() {
        // Partially read bytes stay in the pipe's buffer when the other branch
        // wins the race.
        let (source, line) = tokio::select! {
            line = next_line(&mut stdout), if stdout.is_some() => (Pipe::Stdout, line),
            line = next_line(&mut stderr), if stderr.is_some() => (Pipe::Stderr, line),
            else => break,
        };

        match line? {
            Some(line) => {
                for sink in sinks.iter_mut() {
                    sink.on_line(&line)?;
                }
                lines.push(line);
            }
            None => match source {
                Pipe::Stdout => stdout = None,
                Pipe::Stderr => stderr = None,
            },
        }
    }

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or(-1);
    debug!(cmd = %cmd, exit_code, lines = lines.len(), "process exited");

    Ok(RunOutput { exit_code, lines })
}

enum Pipe {
    Stdout,
    Stderr,
}

/// Line reader over one child pipe that tolerates invalid UTF-8.
struct PipeLines<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> PipeLines<R> {
    fn new(pipe: R) -> Self {
        Self {
            reader: BufReader::new(pipe),
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, or `None` at EOF.
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }
        let line = decode_line(&self.buf);
        self.buf.clear();
        Ok(Some(line))
    }
}

/// Strip a trailing `\n` or `\r\n` and decode lossily.
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

async fn next_line<R>(stream: &mut Option<PipeLines<R>>) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    match stream {
        Some(lines) => lines.next_line().await,
        None => Ok(None),
    }
}

/// Run `cmd` and fail with [`DevtoolsError::ProcessFailed`] on a non-zero exit.
///
/// The error carries the captured output.
pub async fn check<B>(backend: &B, cmd: &CommandSpec, echo: bool) -> Result<Vec<String>>
where
    B: ProcessBackend + ?Sized,
{
    info!(cmd = %cmd, "running command");
    let output = backend.execute(cmd, echo).await?;
    if !output.success() {
        return Err(DevtoolsError::ProcessFailed {
            command: cmd.to_string(),
            exit_code: output.exit_code,
            output: output.lines,
        });
    }
    Ok(output.lines)
}

/// Run `cmd` and return its exit code; a non-zero exit is only logged.
pub async fn call<B>(backend: &B, cmd: &CommandSpec) -> Result<i32>
where
    B: ProcessBackend + ?Sized,
{
    info!(cmd = %cmd, "running command (failure tolerated)");
    let output = backend.execute(cmd, false).await?;
    if !output.success() {
        warn!(cmd = %cmd, exit_code = output.exit_code, "command failed; continuing");
    }
    Ok(output.exit_code)
}

/// Run `cmd` as an existence probe: exit code and output are returned as-is.
pub async fn probe<B>(backend: &B, cmd: &CommandSpec) -> Result<RunOutput>
where
    B: ProcessBackend + ?Sized,
{
    debug!(cmd = %cmd, "probing");
    backend.execute(cmd, false).await
}
