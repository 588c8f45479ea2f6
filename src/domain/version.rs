use crate::domain::VersionIncrement;
use crate::error::{GitBumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version value, ordered by semver precedence
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    /// Create a new release version (no pre-release label)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion(semver::Version::new(major, minor, patch))
    }

    /// Parse a version string, accepting an optional leading `v` or `V`
    pub fn parse(s: &str) -> Result<Self> {
        let clean = s.trim().trim_start_matches('v').trim_start_matches('V');
        semver::Version::parse(clean)
            .map(SemanticVersion)
            .map_err(|e| GitBumpError::version(format!("Invalid version '{}': {}", s, e)))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Pre-release label, if any (e.g. "beta.1")
    pub fn pre_release(&self) -> Option<&str> {
        if self.0.pre.is_empty() {
            None
        } else {
            Some(self.0.pre.as_str())
        }
    }

    /// Major version 0: the product is still in initial development
    pub fn is_initial_development(&self) -> bool {
        self.0.major == 0
    }

    /// Apply an increment.
    ///
    /// Pre-release increments never reach the next major while major is 0:
    /// a pre-release major bumps the minor and a pre-release minor bumps the
    /// patch. From 1.0.0 on they bump like their base magnitude. The
    /// pre-release label is always cleared. `None` and `Unknown` return the
    /// version unchanged.
    pub fn bump(&self, increment: VersionIncrement) -> Self {
        let (major, minor, patch) = (self.0.major, self.0.minor, self.0.patch);
        let initial = self.is_initial_development();

        let (major, minor, patch) = match increment {
            VersionIncrement::None | VersionIncrement::Unknown => return self.clone(),
            VersionIncrement::Major => (major + 1, 0, 0),
            VersionIncrement::Minor => (major, minor + 1, 0),
            VersionIncrement::Patch | VersionIncrement::PrereleasePatch => {
                (major, minor, patch + 1)
            }
            VersionIncrement::PrereleaseMajor if initial => (major, minor + 1, 0),
            VersionIncrement::PrereleaseMajor => (major + 1, 0, 0),
            VersionIncrement::PrereleaseMinor if initial => (major, minor, patch + 1),
            VersionIncrement::PrereleaseMinor => (major, minor + 1, 0),
        };

        SemanticVersion::new(major, minor, patch)
    }

    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl From<semver::Version> for SemanticVersion {
    fn from(version: semver::Version) -> Self {
        SemanticVersion(version)
    }
}

impl FromStr for SemanticVersion {
    type Err = GitBumpError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
