use crate::domain::VersionIncrement;

/// How a file changed in a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Other,
}

/// A file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: String,
    pub status: FileStatus,
}

impl FileInfo {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        FileInfo {
            path: path.into(),
            status,
        }
    }
}

/// A commit as read from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommit {
    /// Full commit id (hex)
    pub id: String,
    /// First line of the commit message
    pub subject: String,
    /// Full commit message, subject included
    pub message: String,
    pub changed_files: Vec<FileInfo>,
}

impl GitCommit {
    /// Create a commit whose message is just its subject
    pub fn new(id: impl Into<String>, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        GitCommit {
            id: id.into(),
            message: subject.clone(),
            subject,
            changed_files: Vec::new(),
        }
    }

    /// Create a commit from a full message; the subject is its first line
    pub fn with_message(id: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let subject = message.lines().next().unwrap_or_default().trim_end().to_string();
        GitCommit {
            id: id.into(),
            subject,
            message,
            changed_files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<FileInfo>) -> Self {
        self.changed_files = files;
        self
    }
}

/// Version signal derived from a single commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GitCommitVersionInfo {
    pub increment: VersionIncrement,
    /// The commit asks to leave the pre-1.0 phase
    pub exits_pre_release: bool,
}

impl GitCommitVersionInfo {
    pub fn new(increment: VersionIncrement, exits_pre_release: bool) -> Self {
        GitCommitVersionInfo {
            increment,
            exits_pre_release,
        }
    }
}
