use crate::domain::VersionIncrement;
use std::fmt;

/// Non-fatal findings made while determining an increment.
/// These never stop the workflow but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits since the last tag on the branch
    NoNewCommits { branch: String },
    /// Some commits carried hints that could not be read
    UnreadableHints { count: usize },
    /// The product is pre-1.0 and no commit asked to leave that phase
    PreReleaseDowngrade {
        from: VersionIncrement,
        to: VersionIncrement,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { branch } => {
                write!(f, "No new commits on '{}' since the last tag", branch)
            }
            BoundaryWarning::UnreadableHints { count } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(f, "{} {} carried no readable version hint", count, noun)
            }
            BoundaryWarning::PreReleaseDowngrade { from, to } => {
                write!(
                    f,
                    "Version is below 1.0.0, increment lowered from '{}' to '{}'",
                    from, to
                )
            }
        }
    }
}
