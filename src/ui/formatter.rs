//! Formatting of workflow results for the terminal.
//!
//! The `format_*` functions build plain strings (styled when the terminal
//! supports it) so they can be tested; the `display_*` functions print them.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::Determination;
use crate::domain::VersionIncrement;
use crate::publish::PublishOutcome;

const MAX_LISTED_COMMITS: usize = 10;
const MAX_SUBJECT_CHARS: usize = 60;

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

pub fn display_determination(determination: &Determination, branch: &str) {
    println!("{}", format_determination(determination, branch));
    for warning in &determination.warnings {
        display_boundary_warning(warning);
    }
}

pub fn display_outcome(outcome: &PublishOutcome) {
    match outcome {
        PublishOutcome::Skipped { .. } => display_status(&format_outcome(outcome)),
        PublishOutcome::Published { .. } => display_success(&format_outcome(outcome)),
    }
}

/// Commit list with the hint read from each commit, then the resolved increment.
///
/// Shows at most ten commits; the rest are summarized as a count.
pub fn format_determination(determination: &Determination, branch: &str) -> String {
    let mut lines = vec![
        format!(
            "{}",
            style(format!("Commits on '{}' since the last tag", branch)).bold()
        ),
        format!(
            "{}",
            style(format!("{} commits:", determination.commits.len())).underlined()
        ),
    ];

    let listed = determination
        .commits
        .iter()
        .zip(determination.infos.iter())
        .take(MAX_LISTED_COMMITS);
    for (i, (commit, info)) in listed.enumerate() {
        lines.push(format!(
            "  {}. {} [{}]",
            i + 1,
            truncate(&commit.subject, MAX_SUBJECT_CHARS),
            style_increment(info.increment)
        ));
    }

    if determination.commits.len() > MAX_LISTED_COMMITS {
        lines.push(format!(
            "  ... and {} more commits",
            determination.commits.len() - MAX_LISTED_COMMITS
        ));
    }

    lines.push(format!(
        "Current version: {}",
        style(&determination.current_version).cyan()
    ));
    lines.push(format!(
        "Increment: {}",
        style_increment(determination.increment)
    ));

    lines.join("\n")
}

pub fn format_outcome(outcome: &PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Skipped { increment } => {
            format!("Nothing to publish (increment '{}')", increment)
        }
        PublishOutcome::Published {
            increment,
            previous,
            current,
            tag,
            commit_id,
        } => format!(
            "Published {} -> {} ({}) as tag {} at {}",
            style(previous).red(),
            style(current).green(),
            increment,
            style(tag).cyan(),
            short_id(commit_id)
        ),
    }
}

fn style_increment(increment: VersionIncrement) -> String {
    let styled = match increment {
        VersionIncrement::Major | VersionIncrement::PrereleaseMajor => {
            style(increment.as_str()).red()
        }
        VersionIncrement::Minor | VersionIncrement::PrereleaseMinor => {
            style(increment.as_str()).yellow()
        }
        VersionIncrement::Patch | VersionIncrement::PrereleasePatch => {
            style(increment.as_str()).green()
        }
        VersionIncrement::None | VersionIncrement::Unknown => style(increment.as_str()).dim(),
    };
    styled.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(7) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
