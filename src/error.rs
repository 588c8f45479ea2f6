use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum GitBumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Version store error: {0}")]
    Store(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Operation cancelled before commit")]
    Cancelled,

    #[error("TOML edit error: {0}")]
    TomlEdit(#[from] toml_edit::TomlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, GitBumpError>;

impl GitBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitBumpError::Config(msg.into())
    }

    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        GitBumpError::Validation(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitBumpError::Version(msg.into())
    }

    /// Create a version store error with context
    pub fn store(msg: impl Into<String>) -> Self {
        GitBumpError::Store(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitBumpError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitBumpError::Remote(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitBumpError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitBumpError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(
            GitBumpError::Cancelled.to_string(),
            "Operation cancelled before commit"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitBumpError::config("x"), "Configuration error"),
            (GitBumpError::validation("x"), "Validation error"),
            (GitBumpError::version("x"), "Version parsing error"),
            (GitBumpError::store("x"), "Version store error"),
            (GitBumpError::tag("x"), "Tag error"),
            (GitBumpError::remote("x"), "Remote operation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_git_error_conversion() {
        let git_err = git2::Error::from_str("object not found");
        let err: GitBumpError = git_err.into();
        assert!(err.to_string().contains("object not found"));
    }
}
