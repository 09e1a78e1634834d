// src/bootstrap/mod.rs

//! Disposable test environment: workspace, database container and the
//! testing config pointing at it.

pub mod bootstrapper;
pub mod runtime_config;
pub mod workspace;

pub use bootstrapper::{BootstrapOptions, Bootstrapper};
pub use runtime_config::{postgres_url, RuntimeConfig};
pub use workspace::{RepoState, SessionWorkspace};
