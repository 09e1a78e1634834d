// src/bootstrap/runtime_config.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::TestEnvSection;
use crate::errors::Result;

const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Testing config consumed by the server's test suite via `CONFIG_FILE_PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub vk_server_token: String,
    pub psql_url_user_server: String,
    pub psql_url_user_client: String,
    pub db_connection_attempts_timeout_seconds: u64,
}

impl RuntimeConfig {
    pub fn new(settings: &TestEnvSection, vk_server_token: impl Into<String>) -> Self {
        Self {
            vk_server_token: vk_server_token.into(),
            psql_url_user_server: postgres_url(settings, &settings.server_role),
            psql_url_user_client: postgres_url(settings, &settings.client_role),
            db_connection_attempts_timeout_seconds: settings
                .db_connection_attempts_timeout_seconds,
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let text = self.render()?;
        fs::write(path, text).with_context(|| format!("writing testing config to {:?}", path))?;
        Ok(())
    }
}

/// `postgres://<role>:<password>@<host>[:<port>]/<database>`
pub fn postgres_url(settings: &TestEnvSection, role: &str) -> String {
    let host = if settings.db_port == DEFAULT_POSTGRES_PORT {
        settings.db_host.clone()
    } else {
        format!("{}:{}", settings.db_host, settings.db_port)
    };
    format!(
        "postgres://{}:{}@{}/{}",
        role, settings.users_password, host, settings.database_name
    )
}
