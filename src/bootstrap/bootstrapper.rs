// src/bootstrap/bootstrapper.rs

//! The bootstrap state machine.
//!
//! Steps run strictly in order and each one either completes or aborts the
//! run:
//!
//! 1. workspace ready
//! 2. repository cloned or pulled
//! 3. database image built
//! 4. stale container stopped and removed
//! 5. fresh container started in the background
//! 6. blind readiness wait
//! 7. testing config written
//! 8. supervision until the container exits

use std::path::PathBuf;

use tracing::{info, warn};

use crate::bootstrap::runtime_config::RuntimeConfig;
use crate::bootstrap::workspace::{RepoState, SessionWorkspace};
use crate::config::TestEnvSection;
use crate::errors::Result;
use crate::exec::{call, check, probe, BackgroundProcess, CommandSpec, ProcessBackend};

/// Caller-supplied inputs of one bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub vk_server_token: String,
    /// Downgrades a failing `git pull` from fatal to a warning.
    pub offline_mode: bool,
}

/// Everything a step needs, passed explicitly instead of living in globals.
pub struct Bootstrapper<'a, B: ProcessBackend + ?Sized> {
    backend: &'a B,
    settings: &'a TestEnvSection,
    workspace: &'a SessionWorkspace,
    options: BootstrapOptions,
}

impl<'a, B: ProcessBackend + ?Sized> Bootstrapper<'a, B> {
    pub fn new(
        backend: &'a B,
        settings: &'a TestEnvSection,
        workspace: &'a SessionWorkspace,
        options: BootstrapOptions,
    ) -> Self {
        Self {
            backend,
            settings,
            workspace,
            options,
        }
    }

    /// Run every step, then block until the database container exits.
    pub async fn run(&self) -> Result<()> {
        info!(step = "workspace", root = ?self.workspace.root(), "ensuring session workspace");
        self.workspace.prepare()?;
        self.run_prepared().await
    }

    /// Steps 2 to 8, for a workspace the caller has already prepared (for
    /// instance to open the session log inside it first).
    pub async fn run_prepared(&self) -> Result<()> {
        self.ensure_repository().await?;
        self.build_image().await?;
        self.remove_stale_instance().await?;

        let service = self.start_instance()?;
        self.wait_for_readiness().await;

        let config_path = self.write_runtime_config()?;
        println!(
            "You can start the tests now, don't forget to export env var CONFIG_FILE_PATH with value: {}",
            config_path.display()
        );
        println!("export CONFIG_FILE_PATH={}", config_path.display());

        self.supervise(service).await
    }

    /// Clone the docker repository, or pull it when a clone already exists.
    pub async fn ensure_repository(&self) -> Result<()> {
        let repo_dir = self.workspace.repo_dir();
        match self.workspace.repo_state()? {
            RepoState::Missing => {
                info!(step = "repository", dir = ?repo_dir, "no docker repo found; cloning");
                check(self.backend, &self.clone_command(), false).await?;
            }
            RepoState::Present => {
                info!(step = "repository", dir = ?repo_dir, "docker repo found; pulling last commits");
                let pull = self.pull_command();
                if self.options.offline_mode {
                    call(self.backend, &pull).await?;
                } else {
                    check(self.backend, &pull, false).await?;
                }
            }
        }
        Ok(())
    }

    pub async fn build_image(&self) -> Result<()> {
        info!(step = "image", image = %self.settings.container_name, "building db container image");
        check(self.backend, &self.build_image_command(), false).await?;
        Ok(())
    }

    /// Stop and remove a container left over from an earlier session.
    ///
    /// Returns whether one was found. Anything other than a successful probe
    /// listing exactly the container name counts as "not found".
    pub async fn remove_stale_instance(&self) -> Result<bool> {
        info!(step = "stale instance", "looking for an already spinning db container");
        let output = probe(self.backend, &self.probe_command()).await?;

        let rows: Vec<&str> = output
            .lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();
        let found = output.success() && rows == [self.settings.container_name.as_str()];

        if !found {
            info!(exit_code = output.exit_code, rows = rows.len(), "spinning db container not found");
            return Ok(false);
        }

        info!(container = %self.settings.container_name, "spinning db container found; stopping and removing it");
        for cmd in self.teardown_commands() {
            check(self.backend, &cmd, false).await?;
        }
        Ok(true)
    }

    pub fn start_instance(&self) -> Result<Box<dyn BackgroundProcess>> {
        info!(step = "start", container = %self.settings.container_name, "starting db container in background");
        self.backend.spawn_background(&self.run_command())
    }

    pub async fn wait_for_readiness(&self) {
        let wait = self.settings.readiness_wait();
        info!(step = "readiness", seconds = wait.as_secs(), "sleeping to wait for db container start");
        tokio::time::sleep(wait).await;
    }

    /// Render the testing config and write it into the workspace.
    pub fn write_runtime_config(&self) -> Result<PathBuf> {
        info!(step = "config", "generating testing config");
        let config = RuntimeConfig::new(self.settings, self.options.vk_server_token.as_str());
        let path = self.workspace.config_path();
        config.write_to(&path)?;
        info!(path = ?path, "wrote testing config");
        Ok(path)
    }

    pub async fn supervise(&self, mut service: Box<dyn BackgroundProcess>) -> Result<()> {
        info!(step = "supervise", "blocking until db container finishes");
        let exit_code = service.wait().await?;
        if exit_code == 0 {
            info!(exit_code, "db container finished");
        } else {
            warn!(exit_code, "db container finished with a non-zero exit code");
        }
        Ok(())
    }

    pub fn clone_command(&self) -> CommandSpec {
        CommandSpec::new(&self.settings.git)
            .arg("clone")
            .arg(&self.settings.docker_repo_url)
            .arg_path(self.workspace.repo_dir())
    }

    pub fn pull_command(&self) -> CommandSpec {
        CommandSpec::new(&self.settings.git)
            .arg("-C")
            .arg_path(self.workspace.repo_dir())
            .arg("pull")
    }

    pub fn build_image_command(&self) -> CommandSpec {
        let context = self.workspace.repo_dir().join(&self.settings.db_image_subdir);
        CommandSpec::new(&self.settings.docker)
            .arg("build")
            .arg("-t")
            .arg(&self.settings.container_name)
            .arg_path(context)
            .arg("--build-arg")
            .arg(format!("USERS_PASSWORD={}", self.settings.users_password))
    }

    pub fn probe_command(&self) -> CommandSpec {
        CommandSpec::new(&self.settings.docker)
            .arg("ps")
            .arg("-a")
            .arg("--filter")
            .arg(format!("name=^/{}$", self.settings.container_name))
            .arg("--format")
            .arg("{{.Names}}")
    }

    /// `docker stop <name>` followed by `docker rm <name>`.
    pub fn teardown_commands(&self) -> [CommandSpec; 2] {
        let name = &self.settings.container_name;
        [
            CommandSpec::new(&self.settings.docker).arg("stop").arg(name),
            CommandSpec::new(&self.settings.docker).arg("rm").arg(name),
        ]
    }

    pub fn run_command(&self) -> CommandSpec {
        let name = &self.settings.container_name;
        let port = self.settings.db_port;
        let mut cmd = CommandSpec::new(&self.settings.docker)
            .arg("run")
            .arg(format!("--name={name}"))
            .arg("-p")
            .arg(format!("{port}:{port}"))
            .arg("-i");
        if self.backend.interactive() {
            cmd = cmd.arg("-t");
        }
        cmd.arg(name)
    }
}
