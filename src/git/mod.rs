//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! the publish workflow needs, so the workflow can run against a real
//! repository or against a recording mock in tests.
//!
//! - [repository::Git2Port]: A real implementation using the `git2` crate
//! - [mock::MockGitPort]: A mock implementation that records every call
//!
//! Every operation takes the working directory explicitly; an implementation
//! keeps no repository state between calls.

pub mod mock;
pub mod repository;

pub use mock::{GitCall, GitOperation, MockGitPort};
pub use repository::Git2Port;

use crate::domain::GitCommit;
use crate::error::Result;
use std::path::Path;

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// Implementations map underlying failures (like `git2::Error`) to the
/// matching [crate::error::GitBumpError] variant and never retry.
pub trait GitPort: Send + Sync {
    /// Commits reachable from HEAD, newest first.
    ///
    /// Only `id`, `subject` and `message` are filled; `changed_files` is left
    /// empty to keep full-history walks cheap.
    fn get_commits(&self, dir: &Path) -> Result<Vec<GitCommit>>;

    /// Commits on `branch` that no tag covers yet, oldest first.
    ///
    /// The tip is the local branch, else `{remote}/{branch}`, else HEAD.
    /// Every tagged commit and its ancestors are excluded. Changed files are
    /// filled in.
    fn commits_since_last_tag(&self, dir: &Path, remote: &str, branch: &str)
        -> Result<Vec<GitCommit>>;

    /// Stage every change in the working tree and commit it on HEAD.
    ///
    /// Returns the id of the new commit.
    fn commit_changes(&self, dir: &Path, message: &str, author_email: &str) -> Result<String>;

    /// Create a tag named `tag_name` pointing at `commit_id`
    fn create_tag(&self, dir: &Path, tag_name: &str, commit_id: &str) -> Result<()>;

    /// Push a single ref (e.g. "refs/heads/main") to `remote`
    fn push_remote(&self, dir: &Path, remote: &str, refspec: &str) -> Result<()>;
}
