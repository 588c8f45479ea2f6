//! Turns commits into version signals.
//!
//! The default [ConventionalClassifier] reads conventional commit subjects
//! (`type(scope)!: description`) and looks for marker strings in the full
//! message.

use crate::config::ClassifierConfig;
use crate::domain::{GitCommit, GitCommitVersionInfo, VersionIncrement};
use crate::error::{GitBumpError, Result};
use regex::Regex;

/// Maps one commit to its version signal
pub trait CommitClassifier: Send + Sync {
    fn classify(&self, commit: &GitCommit) -> GitCommitVersionInfo;
}

/// Parsed representation of a conventional commit subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub has_breaking_marker: bool,
}

/// Classifier driven by conventional commit types and marker strings
pub struct ConventionalClassifier {
    config: ClassifierConfig,
    subject_pattern: Regex,
}

impl ConventionalClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let subject_pattern = Regex::new(r"^([A-Za-z]+)(?:\(([^)]*)\))?(!)?:\s*(.*)$")
            .map_err(|e| GitBumpError::config(format!("Invalid subject pattern: {}", e)))?;

        Ok(ConventionalClassifier {
            config,
            subject_pattern,
        })
    }

    /// Parse a subject line; `None` when it is not a conventional commit
    pub fn parse_subject(&self, subject: &str) -> Option<ParsedCommit> {
        let captures = self.subject_pattern.captures(subject.trim())?;

        Some(ParsedCommit {
            r#type: captures.get(1)?.as_str().to_lowercase(),
            scope: captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty()),
            description: captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            has_breaking_marker: captures.get(3).is_some(),
        })
    }

    fn determine_increment(&self, commit: &GitCommit) -> VersionIncrement {
        if contains_any(&commit.subject, &self.config.skip_markers) {
            return VersionIncrement::None;
        }

        let Some(parsed) = self.parse_subject(&commit.subject) else {
            return VersionIncrement::Unknown;
        };

        let is_breaking = parsed.has_breaking_marker
            || self
                .config
                .breaking_change_indicators
                .iter()
                .any(|indicator| commit.message.contains(indicator.as_str()));

        if is_breaking {
            VersionIncrement::Major
        } else if is_listed(&parsed.r#type, &self.config.minor_types) {
            VersionIncrement::Minor
        } else if is_listed(&parsed.r#type, &self.config.patch_types) {
            VersionIncrement::Patch
        } else if is_listed(&parsed.r#type, &self.config.types) {
            VersionIncrement::None
        } else {
            VersionIncrement::Unknown
        }
    }
}

impl CommitClassifier for ConventionalClassifier {
    fn classify(&self, commit: &GitCommit) -> GitCommitVersionInfo {
        GitCommitVersionInfo {
            increment: self.determine_increment(commit),
            exits_pre_release: contains_any(&commit.message, &self.config.exit_pre_release_markers),
        }
    }
}

fn is_listed(commit_type: &str, types: &[String]) -> bool {
    types.iter().any(|t| t.eq_ignore_ascii_case(commit_type))
}

fn contains_any(text: &str, markers: &[String]) -> bool {
    let text = text.to_lowercase();
    markers
        .iter()
        .any(|marker| text.contains(&marker.to_lowercase()))
}
