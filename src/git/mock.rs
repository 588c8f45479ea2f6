use crate::domain::GitCommit;
use crate::error::{GitBumpError, Result};
use crate::git::GitPort;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Operations a [MockGitPort] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitOperation {
    GetCommits,
    CommitsSinceLastTag,
    CommitChanges,
    CreateTag,
    PushRemote,
}

/// A call received by [MockGitPort]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    GetCommits {
        dir: PathBuf,
    },
    CommitsSinceLastTag {
        dir: PathBuf,
        remote: String,
        branch: String,
    },
    CommitChanges {
        dir: PathBuf,
        message: String,
        author_email: String,
    },
    CreateTag {
        dir: PathBuf,
        tag_name: String,
        commit_id: String,
    },
    PushRemote {
        dir: PathBuf,
        remote: String,
        refspec: String,
    },
}

/// Mock git port for testing without actual git operations
///
/// History is kept newest first. By default `commit_changes` records the new
/// commit at the top of the history so it can be found again by subject.
pub struct MockGitPort {
    history: Mutex<Vec<GitCommit>>,
    pending: Vec<GitCommit>,
    record_commits: bool,
    fail_on: Option<GitOperation>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockGitPort {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockGitPort {
            history: Mutex::new(Vec::new()),
            pending: Vec::new(),
            record_commits: true,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// History returned by `get_commits`, newest first
    pub fn with_history(mut self, commits: Vec<GitCommit>) -> Self {
        self.history = Mutex::new(commits);
        self
    }

    /// Commits returned by `commits_since_last_tag`, oldest first
    pub fn with_pending(mut self, commits: Vec<GitCommit>) -> Self {
        self.pending = commits;
        self
    }

    /// Keep the history fixed: `commit_changes` does not add to it
    pub fn fixed_history(mut self) -> Self {
        self.record_commits = false;
        self
    }

    /// Make one operation fail
    pub fn fail_on(mut self, operation: GitOperation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&GitCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: GitCall, operation: GitOperation) -> Result<()> {
        lock(&self.calls).push(call);
        if self.fail_on == Some(operation) {
            return Err(GitBumpError::Git(git2::Error::from_str(&format!(
                "mock failure in {:?}",
                operation
            ))));
        }
        Ok(())
    }
}

impl Default for MockGitPort {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl GitPort for MockGitPort {
    fn get_commits(&self, dir: &Path) -> Result<Vec<GitCommit>> {
        self.record(
            GitCall::GetCommits {
                dir: dir.to_path_buf(),
            },
            GitOperation::GetCommits,
        )?;
        Ok(lock(&self.history).clone())
    }

    fn commits_since_last_tag(
        &self,
        dir: &Path,
        remote: &str,
        branch: &str,
    ) -> Result<Vec<GitCommit>> {
        self.record(
            GitCall::CommitsSinceLastTag {
                dir: dir.to_path_buf(),
                remote: remote.to_string(),
                branch: branch.to_string(),
            },
            GitOperation::CommitsSinceLastTag,
        )?;
        Ok(self.pending.clone())
    }

    fn commit_changes(&self, dir: &Path, message: &str, author_email: &str) -> Result<String> {
        self.record(
            GitCall::CommitChanges {
                dir: dir.to_path_buf(),
                message: message.to_string(),
                author_email: author_email.to_string(),
            },
            GitOperation::CommitChanges,
        )?;

        let mut history = lock(&self.history);
        let id = format!("mock{:04}", history.len() + 1);
        if self.record_commits {
            history.insert(0, GitCommit::with_message(id.clone(), message));
        }
        Ok(id)
    }

    fn create_tag(&self, dir: &Path, tag_name: &str, commit_id: &str) -> Result<()> {
        self.record(
            GitCall::CreateTag {
                dir: dir.to_path_buf(),
                tag_name: tag_name.to_string(),
                commit_id: commit_id.to_string(),
            },
            GitOperation::CreateTag,
        )
    }

    fn push_remote(&self, dir: &Path, remote: &str, refspec: &str) -> Result<()> {
        self.record(
            GitCall::PushRemote {
                dir: dir.to_path_buf(),
                remote: remote.to_string(),
                refspec: refspec.to_string(),
            },
            GitOperation::PushRemote,
        )
    }
}
