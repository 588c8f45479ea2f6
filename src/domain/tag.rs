use crate::domain::SemanticVersion;
use crate::error::{GitBumpError, Result};
use std::fmt;

/// Name of a release tag: `{prefix}{version}{suffix}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName {
    pub name: String,
}

impl TagName {
    /// Compose a tag name from caller-supplied affixes
    pub fn compose(prefix: &str, version: &SemanticVersion, suffix: &str) -> Self {
        TagName {
            name: format!("{}{}{}", prefix, version, suffix),
        }
    }

    /// Full reference name, e.g. "refs/tags/v1.2.3"
    pub fn ref_name(&self) -> String {
        format!("refs/tags/{}", self.name)
    }

    /// Reject names git would refuse as a reference
    pub fn validate(&self) -> Result<()> {
        if git2::Reference::is_valid_name(&self.ref_name()) {
            Ok(())
        } else {
            Err(GitBumpError::tag(format!(
                "'{}' is not a valid tag name",
                self.name
            )))
        }
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Full reference name of a local branch, e.g. "refs/heads/main"
pub fn branch_ref(branch_name: &str) -> String {
    format!("refs/heads/{}", branch_name)
}
