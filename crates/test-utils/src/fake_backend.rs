use std::sync::{Arc, Mutex};

use server_devtools::errors::Result;
use server_devtools::exec::{BackgroundProcess, BoxFuture, CommandSpec, ProcessBackend, RunOutput};

/// A fake process backend that:
/// - records every command line it is asked to run (unquoted, space-joined)
/// - replies with the first scripted output whose prefix matches, or with an
///   empty successful run otherwise
/// - hands out background processes that exit immediately.
#[derive(Clone, Default)]
pub struct FakeBackend {
    scripted: Arc<Mutex<Vec<(String, RunOutput)>>>,
    executed: Arc<Mutex<Vec<String>>>,
    background: Arc<Mutex<Vec<String>>>,
    background_exit_code: i32,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to commands starting with `prefix` with `exit_code` and `lines`.
    pub fn respond(self, prefix: &str, exit_code: i32, lines: &[&str]) -> Self {
        let output = RunOutput {
            exit_code,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        };
        self.scripted
            .lock()
            .unwrap()
            .push((prefix.to_string(), output));
        self
    }

    pub fn background_exit_code(mut self, code: i32) -> Self {
        self.background_exit_code = code;
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn background(&self) -> Vec<String> {
        self.background.lock().unwrap().clone()
    }

    /// Whether any executed command starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.executed().iter().any(|c| c.starts_with(prefix))
    }

    fn render(cmd: &CommandSpec) -> String {
        cmd.argv().collect::<Vec<_>>().join(" ")
    }
}

impl ProcessBackend for FakeBackend {
    fn execute<'a>(&'a self, cmd: &'a CommandSpec, _echo: bool) -> BoxFuture<'a, Result<RunOutput>> {
        let line = Self::render(cmd);
        self.executed.lock().unwrap().push(line.clone());

        let output = self
            .scripted
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default();

        Box::pin(async move { Ok(output) })
    }

    fn spawn_background(&self, cmd: &CommandSpec) -> Result<Box<dyn BackgroundProcess>> {
        self.background.lock().unwrap().push(Self::render(cmd));
        Ok(Box::new(FakeBackgroundProcess {
            exit_code: self.background_exit_code,
        }))
    }
}

/// A background process that has already finished with a fixed exit code.
pub struct FakeBackgroundProcess {
    pub exit_code: i32,
}

impl BackgroundProcess for FakeBackgroundProcess {
    fn wait(&mut self) -> BoxFuture<'_, Result<i32>> {
        let code = self.exit_code;
        Box::pin(async move { Ok(code) })
    }
}
