//! Reduces per-commit version signals into one increment.

use crate::domain::{GitCommitVersionInfo, SemanticVersion, VersionIncrement};
use tracing::{debug, info};

/// Highest-ranked increment among the candidates, `None` when there are none.
///
/// Pre-release forms rank with their base magnitude, so the first candidate
/// seen at the top rank is returned.
pub fn priority_increment<I>(increments: I) -> VersionIncrement
where
    I: IntoIterator<Item = VersionIncrement>,
{
    increments
        .into_iter()
        .fold(VersionIncrement::None, |best, candidate| {
            if candidate.rank() > best.rank() {
                candidate
            } else {
                best
            }
        })
}

/// Resolve the increment for a batch of commits.
///
/// While the current version is below 1.0.0 the result is lowered to its
/// pre-release form unless at least one commit asks to exit pre-release.
pub fn resolve(
    commit_infos: &[GitCommitVersionInfo],
    current_version: &SemanticVersion,
) -> VersionIncrement {
    if commit_infos.is_empty() {
        debug!("No commits to resolve");
        return VersionIncrement::None;
    }

    let increment = priority_increment(commit_infos.iter().map(|info| info.increment));
    info!(%increment, commits = commit_infos.len(), "Determined priority increment");

    let exits_pre_release = commit_infos.iter().any(|info| info.exits_pre_release);
    if !exits_pre_release && current_version.is_initial_development() {
        let lowered = increment.to_pre_release();
        if lowered != increment {
            info!(
                from = %increment,
                to = %lowered,
                version = %current_version,
                "Version is pre-1.0, lowering increment"
            );
        }
        return lowered;
    }

    increment
}
