//! Publish workflow: bump the on-disk version, then record it in git.
//!
//! The steps run strictly in order and stop at the first failure:
//! read version, apply increment, re-read version, commit, locate the
//! commit, tag it, push the branch, push the tag. Nothing is retried or
//! rolled back, so a failure after the commit leaves a local commit (and
//! possibly a tag) that still has to be pushed by hand.

use crate::domain::{branch_ref, SemanticVersion, TagName, VersionIncrement};
use crate::error::{GitBumpError, Result};
use crate::git::GitPort;
use crate::store::{SearchMode, VersionStore};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the publish step needs to know about the repository
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Directory containing the `.git` folder
    pub git_directory: PathBuf,
    pub remote_target: String,
    pub branch_name: String,
    /// Directory holding the version files; the git directory when unset
    pub target_directory: Option<PathBuf>,
    pub search_mode: SearchMode,
    pub commit_author_email: String,
    pub tag_prefix: String,
    pub tag_suffix: String,
}

impl PublishRequest {
    pub fn new(
        git_directory: impl Into<PathBuf>,
        branch_name: impl Into<String>,
        commit_author_email: impl Into<String>,
    ) -> Self {
        PublishRequest {
            git_directory: git_directory.into(),
            remote_target: "origin".to_string(),
            branch_name: branch_name.into(),
            target_directory: None,
            search_mode: SearchMode::default(),
            commit_author_email: commit_author_email.into(),
            tag_prefix: String::new(),
            tag_suffix: String::new(),
        }
    }

    /// Directory the version store is queried with
    pub fn effective_target_directory(&self) -> &Path {
        match &self.target_directory {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => &self.git_directory,
        }
    }

    /// Check the repository side of the request: git directory, branch and
    /// target directory.
    pub fn validate_repository(&self) -> Result<()> {
        if !self.git_directory.is_dir() {
            return Err(GitBumpError::validation(format!(
                "Git directory '{}' must be a valid directory",
                self.git_directory.display()
            )));
        }

        if !self.git_directory.join(".git").is_dir() {
            return Err(GitBumpError::validation(format!(
                "'{}' must contain a .git directory",
                self.git_directory.display()
            )));
        }

        if self.branch_name.trim().is_empty() {
            return Err(GitBumpError::validation("Branch name must not be empty"));
        }

        if let Some(target) = &self.target_directory {
            if !target.as_os_str().is_empty() && !target.is_dir() {
                return Err(GitBumpError::validation(format!(
                    "Target directory '{}' must be a valid directory",
                    target.display()
                )));
            }
        }

        Ok(())
    }

    /// Check the whole request before anything touches the disk or the
    /// repository
    pub fn validate(&self) -> Result<()> {
        self.validate_repository()?;

        if self.commit_author_email.trim().is_empty() {
            return Err(GitBumpError::validation(
                "Commit author email must not be empty",
            ));
        }

        if self.remote_target.trim().is_empty() {
            return Err(GitBumpError::validation("Remote target must not be empty"));
        }

        TagName::compose(
            &self.tag_prefix,
            &SemanticVersion::new(0, 0, 0),
            &self.tag_suffix,
        )
        .validate()
    }
}

/// Cooperative cancellation flag.
///
/// The publish step only honours it before the commit is created.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a publish attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// The increment was `None` or `Unknown`; nothing was touched
    Skipped { increment: VersionIncrement },
    Published {
        increment: VersionIncrement,
        previous: SemanticVersion,
        current: SemanticVersion,
        tag: TagName,
        commit_id: String,
    },
}

/// Message of the version commit. The markers keep CI and the next
/// resolution from reacting to it.
pub fn commit_message(previous: &SemanticVersion, current: &SemanticVersion) -> String {
    format!(
        "Increment version {} -> {} [skip ci] [skip hint]",
        previous, current
    )
}

/// Applies an increment through a version store and publishes it through git
pub struct Publisher<'a, G: ?Sized, S: ?Sized> {
    git: &'a G,
    store: &'a S,
    cancel: CancelToken,
}

impl<'a, G, S> Publisher<'a, G, S>
where
    G: GitPort + ?Sized,
    S: VersionStore + ?Sized,
{
    pub fn new(git: &'a G, store: &'a S) -> Self {
        Publisher {
            git,
            store,
            cancel: CancelToken::default(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn ensure_not_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            warn!("Publish cancelled before commit");
            return Err(GitBumpError::Cancelled);
        }
        Ok(())
    }

    pub fn publish(
        &self,
        increment: VersionIncrement,
        request: &PublishRequest,
    ) -> Result<PublishOutcome> {
        if !increment.is_actionable() {
            info!(%increment, "Nothing to publish");
            return Ok(PublishOutcome::Skipped { increment });
        }
        self.ensure_not_cancelled()?;

        let git_dir = request.git_directory.as_path();
        let target_dir = request.effective_target_directory();
        let mode = request.search_mode;

        let previous = self.store.latest_version(target_dir, mode)?;
        debug!(version = %previous, dir = %target_dir.display(), "Read current version");

        self.store.apply_increment(target_dir, mode, increment)?;
        let current = self.store.latest_version(target_dir, mode)?;
        info!(from = %previous, to = %current, %increment, "Version files updated");

        self.ensure_not_cancelled()?;

        // From here on every step changes the repository or the remote.
        let message = commit_message(&previous, &current);
        let created_id = self
            .git
            .commit_changes(git_dir, &message, &request.commit_author_email)?;

        let commit_id = self
            .git
            .get_commits(git_dir)?
            .into_iter()
            .find(|commit| commit.subject == message)
            .map(|commit| commit.id)
            .ok_or_else(|| {
                GitBumpError::tag(format!("Cannot locate commit '{}' to tag", message))
            })?;
        if commit_id != created_id {
            warn!(
                located = %commit_id,
                created = %created_id,
                "Located version commit differs from the one just created"
            );
        }

        let tag = TagName::compose(&request.tag_prefix, &current, &request.tag_suffix);
        self.git.create_tag(git_dir, &tag.name, &commit_id)?;

        self.git.push_remote(
            git_dir,
            &request.remote_target,
            &branch_ref(&request.branch_name),
        )?;
        self.git
            .push_remote(git_dir, &request.remote_target, &tag.ref_name())?;

        info!(%tag, commit = %commit_id, remote = %request.remote_target, "Published version");
        Ok(PublishOutcome::Published {
            increment,
            previous,
            current,
            tag,
            commit_id,
        })
    }
}
