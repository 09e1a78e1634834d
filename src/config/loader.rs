// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{DevtoolsConfig, RawDevtoolsConfig};
use crate::errors::Result;

/// Load a settings file from a given path and return the raw `RawDevtoolsConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawDevtoolsConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawDevtoolsConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a settings file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<DevtoolsConfig> {
    let raw_config = load_from_path(&path)?;
    let config = DevtoolsConfig::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the settings both binaries run with: the file given via
/// `--config`, or the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<DevtoolsConfig> {
    match path {
        Some(path) => load_and_validate(path),
        None => Ok(DevtoolsConfig::default()),
    }
}
