// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level settings as read from an optional TOML file.
///
/// ```toml
/// [artifacts]
/// library_name = "recipe_calculator_lib"
///
/// [test_env]
/// container_name = "db_container_for_server_tests"
/// readiness_wait_secs = 7
/// ```
///
/// All sections and keys are optional; [`Default`] yields the values both
/// workflows use when no file is given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDevtoolsConfig {
    #[serde(default)]
    pub artifacts: ArtifactsSection,

    #[serde(default)]
    pub test_env: TestEnvSection,
}

/// Validated settings. Only obtainable through `TryFrom<RawDevtoolsConfig>`
/// (see `validate.rs`) or [`DevtoolsConfig::default`].
#[derive(Debug, Clone)]
pub struct DevtoolsConfig {
    pub artifacts: ArtifactsSection,
    pub test_env: TestEnvSection,
}

impl DevtoolsConfig {
    pub(crate) fn new_unchecked(artifacts: ArtifactsSection, test_env: TestEnvSection) -> Self {
        Self {
            artifacts,
            test_env,
        }
    }
}

impl Default for DevtoolsConfig {
    fn default() -> Self {
        Self::new_unchecked(ArtifactsSection::default(), TestEnvSection::default())
    }
}

/// `[artifacts]` section: how release binaries are built and located.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsSection {
    /// Directory the build commands run in.
    pub project_dir: PathBuf,

    /// Build tool program.
    pub cargo: String,

    /// Library whose test binary is exported. Matched as a substring of each
    /// raw build-event line.
    pub library_name: String,

    /// Location of the server executable, relative to `project_dir`.
    pub server_binary: PathBuf,
}

impl Default for ArtifactsSection {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            cargo: "cargo".to_string(),
            library_name: "recipe_calculator_lib".to_string(),
            server_binary: PathBuf::from("target/release/recipe_calculator_bin"),
        }
    }
}

/// `[test_env]` section: the disposable database environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestEnvSection {
    /// Session workspace root, resolved against the current directory.
    pub workspace_dir: PathBuf,

    pub git: String,
    pub docker: String,

    pub docker_repo_url: String,
    /// Name of the clone inside the workspace.
    pub docker_repo_dir_name: String,
    /// Docker build context for the database image, relative to the clone.
    pub db_image_subdir: String,

    /// Used both as image tag and container name.
    pub container_name: String,

    pub users_password: String,
    pub database_name: String,
    pub server_role: String,
    pub client_role: String,
    pub db_host: String,
    pub db_port: u16,

    /// Blind wait after starting the container. There is no health check.
    pub readiness_wait_secs: u64,

    pub db_connection_attempts_timeout_seconds: u64,

    pub config_file_name: String,
}

impl TestEnvSection {
    pub fn readiness_wait(&self) -> Duration {
        Duration::from_secs(self.readiness_wait_secs)
    }
}

impl Default for TestEnvSection {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::from(".testing_env"),
            git: "git".to_string(),
            docker: "docker".to_string(),
            docker_repo_url: "https://github.com/blazern/recipe_calculator_docker.git".to_string(),
            docker_repo_dir_name: "recipe_calculator_docker".to_string(),
            db_image_subdir: "db".to_string(),
            container_name: "db_container_for_server_tests".to_string(),
            users_password: "123".to_string(),
            database_name: "recipe_calculator_main".to_string(),
            server_role: "recipe_calculator_server".to_string(),
            client_role: "recipe_calculator_client".to_string(),
            db_host: "localhost".to_string(),
            db_port: 5432,
            readiness_wait_secs: 7,
            db_connection_attempts_timeout_seconds: 10,
            config_file_name: "testing_config.json".to_string(),
        }
    }
}
