// src/bootstrap/workspace.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use tracing::debug;

use crate::config::TestEnvSection;
use crate::errors::{DevtoolsError, Result};
use crate::exec::SessionLog;

const LOGS_DIR_NAME: &str = "logs";

/// On-disk tree of one bootstrap session:
///
/// ```text
/// <root>/
///   logs/logs_stdout_<millis>.log
///   <docker repo clone>/
///   testing_config.json
/// ```
///
/// The tree is reused across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWorkspace {
    root: PathBuf,
    repo_dir_name: String,
    config_file_name: String,
}

/// Whether the dependency repository has been cloned yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Missing,
    Present,
}

impl SessionWorkspace {
    /// Workspace rooted at `root`, made absolute against the current directory.
    pub fn new(root: impl AsRef<Path>, settings: &TestEnvSection) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())
            .with_context(|| format!("resolving workspace path {:?}", root.as_ref()))?;
        Ok(Self {
            root,
            repo_dir_name: settings.docker_repo_dir_name.clone(),
            config_file_name: settings.config_file_name.clone(),
        })
    }

    pub fn from_settings(settings: &TestEnvSection) -> Result<Self> {
        Self::new(&settings.workspace_dir, settings)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR_NAME)
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.root.join(&self.repo_dir_name)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config_file_name)
    }

    /// Create the root and logs directories if they are absent.
    pub fn prepare(&self) -> Result<()> {
        ensure_dir(&self.root)?;
        ensure_dir(&self.logs_dir())?;
        Ok(())
    }

    pub fn repo_state(&self) -> Result<RepoState> {
        let repo_dir = self.repo_dir();
        if !repo_dir.exists() {
            return Ok(RepoState::Missing);
        }
        if !repo_dir.is_dir() {
            return Err(DevtoolsError::WorkspaceConflict(repo_dir));
        }
        Ok(RepoState::Present)
    }

    /// Open a fresh session log in the logs directory.
    pub fn open_session_log(&self) -> Result<SessionLog> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        SessionLog::open(self.logs_dir().join(format!("logs_stdout_{millis}.log")))
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(DevtoolsError::WorkspaceConflict(path.to_path_buf()));
    }
    fs::create_dir_all(path).with_context(|| format!("creating directory {:?}", path))?;
    debug!(path = ?path, "directory ready");
    Ok(())
}
