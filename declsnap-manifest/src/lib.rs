//! Parsing and validation of `declsnap.toml` manifests.
//!
//! A manifest describes the declarations a compilation exposes to the
//! generator: types with their declaration fragments, and methods that may
//! carry the marker annotation.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod manifest;
mod validate;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
pub use file::DeclsnapToml;
pub use manifest::{
    ContainerEntry, FragmentEntry, GeneratorConfig, IndentSetting, Manifest, MethodEntry,
    TypeEntry, parse_manifest,
};
pub use validate::ParseContext;

/// Parse a declsnap.toml file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Manifest> {
    Manifest::from_file(path)
}

/// Parse a declsnap.toml from a string (uses "declsnap.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Manifest> {
    parse_manifest(content, "declsnap.toml")
}
