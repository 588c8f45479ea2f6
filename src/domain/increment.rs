use crate::error::{GitBumpError, Result};
use std::fmt;
use std::str::FromStr;

/// How a version should change.
///
/// Each magnitude (patch, minor, major) has a pre-release counterpart that
/// keeps a `0.x` product below `1.0.0`. `None` and `Unknown` carry no
/// magnitude: `None` means no commit asked for a bump, `Unknown` means at
/// least one commit carried a hint that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionIncrement {
    #[default]
    None,
    Unknown,
    Patch,
    Minor,
    Major,
    PrereleasePatch,
    PrereleaseMinor,
    PrereleaseMajor,
}

impl VersionIncrement {
    /// Priority rank. Pre-release forms share the rank of their base magnitude.
    pub fn rank(self) -> u8 {
        match self {
            VersionIncrement::None => 0,
            VersionIncrement::Unknown => 1,
            VersionIncrement::Patch | VersionIncrement::PrereleasePatch => 2,
            VersionIncrement::Minor | VersionIncrement::PrereleaseMinor => 3,
            VersionIncrement::Major | VersionIncrement::PrereleaseMajor => 4,
        }
    }

    /// Map a magnitude to its pre-release counterpart.
    ///
    /// `None`, `Unknown` and values that are already pre-release map to themselves.
    pub fn to_pre_release(self) -> Self {
        match self {
            VersionIncrement::Patch => VersionIncrement::PrereleasePatch,
            VersionIncrement::Minor => VersionIncrement::PrereleaseMinor,
            VersionIncrement::Major => VersionIncrement::PrereleaseMajor,
            other => other,
        }
    }

    pub fn is_pre_release(self) -> bool {
        matches!(
            self,
            VersionIncrement::PrereleasePatch
                | VersionIncrement::PrereleaseMinor
                | VersionIncrement::PrereleaseMajor
        )
    }

    /// Whether publishing this increment changes anything
    pub fn is_actionable(self) -> bool {
        !matches!(self, VersionIncrement::None | VersionIncrement::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VersionIncrement::None => "none",
            VersionIncrement::Unknown => "unknown",
            VersionIncrement::Patch => "patch",
            VersionIncrement::Minor => "minor",
            VersionIncrement::Major => "major",
            VersionIncrement::PrereleasePatch => "prerelease-patch",
            VersionIncrement::PrereleaseMinor => "prerelease-minor",
            VersionIncrement::PrereleaseMajor => "prerelease-major",
        }
    }
}

impl fmt::Display for VersionIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionIncrement {
    type Err = GitBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(VersionIncrement::None),
            "unknown" => Ok(VersionIncrement::Unknown),
            "patch" => Ok(VersionIncrement::Patch),
            "minor" => Ok(VersionIncrement::Minor),
            "major" => Ok(VersionIncrement::Major),
            "prerelease-patch" | "beta-patch" => Ok(VersionIncrement::PrereleasePatch),
            "prerelease-minor" | "beta-minor" => Ok(VersionIncrement::PrereleaseMinor),
            "prerelease-major" | "beta-major" => Ok(VersionIncrement::PrereleaseMajor),
            other => Err(GitBumpError::version(format!(
                "Invalid version increment: '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [VersionIncrement; 8] = [
        VersionIncrement::None,
        VersionIncrement::Unknown,
        VersionIncrement::Patch,
        VersionIncrement::Minor,
        VersionIncrement::Major,
        VersionIncrement::PrereleasePatch,
        VersionIncrement::PrereleaseMinor,
        VersionIncrement::PrereleaseMajor,
    ];

    #[test]
    fn test_rank_order() {
        assert!(VersionIncrement::None.rank() < VersionIncrement::Unknown.rank());
        assert!(VersionIncrement::Unknown.rank() < VersionIncrement::Patch.rank());
        assert!(VersionIncrement::Patch.rank() < VersionIncrement::Minor.rank());
        assert!(VersionIncrement::Minor.rank() < VersionIncrement::Major.rank());
    }

    #[test]
    fn test_pre_release_shares_rank() {
        for inc in ALL {
            assert_eq!(inc.rank(), inc.to_pre_release().rank());
        }
    }

    #[test]
    fn test_to_pre_release() {
        assert_eq!(
            VersionIncrement::Minor.to_pre_release(),
            VersionIncrement::PrereleaseMinor
        );
        assert_eq!(VersionIncrement::None.to_pre_release(), VersionIncrement::None);
        assert_eq!(
            VersionIncrement::Unknown.to_pre_release(),
            VersionIncrement::Unknown
        );
        assert_eq!(
            VersionIncrement::PrereleaseMajor.to_pre_release(),
            VersionIncrement::PrereleaseMajor
        );
    }

    #[test]
    fn test_is_actionable() {
        assert!(!VersionIncrement::None.is_actionable());
        assert!(!VersionIncrement::Unknown.is_actionable());
        assert!(VersionIncrement::PrereleasePatch.is_actionable());
        assert!(VersionIncrement::Major.is_actionable());
    }

    #[test]
    fn test_parse_display_agree() {
        for inc in ALL {
            assert_eq!(inc.to_string().parse::<VersionIncrement>().unwrap(), inc);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "Beta-Minor".parse::<VersionIncrement>().unwrap(),
            VersionIncrement::PrereleaseMinor
        );
        assert!("huge".parse::<VersionIncrement>().is_err());
    }
}
