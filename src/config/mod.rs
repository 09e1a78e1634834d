// src/config/mod.rs

//! Settings for both workflows.
//!
//! Responsibilities:
//! - Define the TOML-backed data model with built-in defaults (`model.rs`).
//! - Load an optional settings file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{ArtifactsSection, DevtoolsConfig, RawDevtoolsConfig, TestEnvSection};
