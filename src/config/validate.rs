// src/config/validate.rs

use crate::config::model::{ArtifactsSection, DevtoolsConfig, RawDevtoolsConfig, TestEnvSection};
use crate::errors::{DevtoolsError, Result};

impl TryFrom<RawDevtoolsConfig> for DevtoolsConfig {
    type Error = DevtoolsError;

    fn try_from(raw: RawDevtoolsConfig) -> std::result::Result<Self, Self::Error> {
        validate_artifacts(&raw.artifacts)?;
        validate_test_env(&raw.test_env)?;
        Ok(DevtoolsConfig::new_unchecked(raw.artifacts, raw.test_env))
    }
}

fn validate_artifacts(section: &ArtifactsSection) -> Result<()> {
    require_non_empty("artifacts", "cargo", &section.cargo)?;
    require_non_empty("artifacts", "library_name", &section.library_name)?;
    if section.server_binary.as_os_str().is_empty() {
        return Err(empty_key("artifacts", "server_binary"));
    }
    Ok(())
}

fn validate_test_env(section: &TestEnvSection) -> Result<()> {
    if section.workspace_dir.as_os_str().is_empty() {
        return Err(empty_key("test_env", "workspace_dir"));
    }

    let required = [
        ("git", &section.git),
        ("docker", &section.docker),
        ("docker_repo_url", &section.docker_repo_url),
        ("docker_repo_dir_name", &section.docker_repo_dir_name),
        ("container_name", &section.container_name),
        ("database_name", &section.database_name),
        ("server_role", &section.server_role),
        ("client_role", &section.client_role),
        ("db_host", &section.db_host),
        ("config_file_name", &section.config_file_name),
    ];
    for (key, value) in required {
        require_non_empty("test_env", key, value)?;
    }

    if section.db_port == 0 {
        return Err(DevtoolsError::ConfigError(
            "[test_env].db_port must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn require_non_empty(section: &str, key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(empty_key(section, key));
    }
    Ok(())
}

fn empty_key(section: &str, key: &str) -> DevtoolsError {
    DevtoolsError::ConfigError(format!("[{section}].{key} must not be empty"))
}
