//! Version store abstraction
//!
//! A version store owns the version-bearing files of a project: it reports
//! the current version and rewrites the files when an increment is applied.
//! The publish workflow always re-reads the version after applying, so a
//! store is the only authority on what the new version string looks like.
//!
//! - [cargo::CargoManifestStore]: versions kept in `Cargo.toml` manifests
//! - [mock::MockVersionStore]: in-memory store that records its calls

pub mod cargo;
pub mod mock;

pub use cargo::CargoManifestStore;
pub use mock::{MockVersionStore, StoreCall};

use crate::domain::{SemanticVersion, VersionIncrement};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How far below the target directory version files are searched for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// The directory and all of its subdirectories
    #[default]
    Recursive,
    /// Only the directory itself
    TopLevel,
}

/// Reads and rewrites the version of the project in a directory
pub trait VersionStore: Send + Sync {
    /// Highest version found in the directory
    fn latest_version(&self, dir: &Path, mode: SearchMode) -> Result<SemanticVersion>;

    /// Rewrite the version files according to `increment`
    fn apply_increment(&self, dir: &Path, mode: SearchMode, increment: VersionIncrement)
        -> Result<()>;
}
