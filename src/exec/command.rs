// src/exec/command.rs

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{DevtoolsError, Result};

/// An external command: program, arguments and an optional working directory.
///
/// Immutable once built; the builder methods consume `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Tokenize a single shell string following POSIX shell quoting rules.
    ///
    /// The string is split, not interpreted: `&&`, pipes and redirections are
    /// passed through as plain arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let tokens = shlex::split(line).ok_or_else(|| {
            DevtoolsError::ConfigError(format!("unbalanced quoting in command: {line}"))
        })?;
        Self::from_argv(tokens)
    }

    /// Build from a pre-tokenized argument list (program first).
    pub fn from_argv<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = argv.into_iter().map(Into::into);
        let program = tokens
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DevtoolsError::ConfigError("empty command".to_string()))?;
        Ok(Self {
            program,
            args: tokens.collect(),
            current_dir: None,
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn arg_path(self, path: impl AsRef<Path>) -> Self {
        let arg = path.as_ref().to_string_lossy().into_owned();
        self.arg(arg)
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Program followed by its arguments, unquoted.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-quoted command line, suitable for logs and error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in std::iter::once(&self.program).chain(self.args.iter()) {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            let quoted = shlex::try_quote(token).unwrap_or(Cow::Borrowed(token.as_str()));
            f.write_str(&quoted)?;
        }
        Ok(())
    }
}
