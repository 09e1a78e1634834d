// src/artifacts/mod.rs

//! Release artifact export.
//!
//! - [`events`] parses the build event stream and resolves the test binary.
//! - [`copy`] copies executables without dropping their metadata.
//! - [`extractor`] drives the build and ties the two together.

pub mod copy;
pub mod events;
pub mod extractor;

pub use copy::copy_preserving_metadata;
pub use events::{find_test_binary, resolve_test_binary, BuildEvent};
pub use extractor::{ArtifactExtractor, ExtractedArtifacts};
