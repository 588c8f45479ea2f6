//! Domain logic - pure value types independent of git operations

pub mod commit;
pub mod increment;
pub mod tag;
pub mod version;

pub use commit::{FileInfo, FileStatus, GitCommit, GitCommitVersionInfo};
pub use increment::VersionIncrement;
pub use tag::{branch_ref, TagName};
pub use version::SemanticVersion;
