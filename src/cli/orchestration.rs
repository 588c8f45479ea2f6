//! Top-level workflow composition
//!
//! Wires the classifier, the resolver and the publisher together. These
//! entrypoints only sequence the pieces; every decision lives in
//! [crate::resolver] and [crate::publish].

use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::classifier::CommitClassifier;
use crate::domain::{GitCommit, GitCommitVersionInfo, SemanticVersion, VersionIncrement};
use crate::error::Result;
use crate::git::GitPort;
use crate::publish::{CancelToken, PublishOutcome, PublishRequest, Publisher};
use crate::resolver;
use crate::store::VersionStore;

/// Result of resolving the commits since the last publish
#[derive(Debug, Clone, PartialEq)]
pub struct Determination {
    pub commits: Vec<GitCommit>,
    pub infos: Vec<GitCommitVersionInfo>,
    pub current_version: SemanticVersion,
    pub increment: VersionIncrement,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of a publish run that resolved its own increment
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub determination: Determination,
    pub outcome: PublishOutcome,
}

/// Composes the collaborators of a versioning run
pub struct Workflow<'a> {
    git: &'a dyn GitPort,
    store: &'a dyn VersionStore,
    classifier: &'a dyn CommitClassifier,
    cancel: CancelToken,
}

impl<'a> Workflow<'a> {
    pub fn new(
        git: &'a dyn GitPort,
        store: &'a dyn VersionStore,
        classifier: &'a dyn CommitClassifier,
    ) -> Self {
        Workflow {
            git,
            store,
            classifier,
            cancel: CancelToken::default(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Classify the commits since the last tag and resolve one increment
    pub fn determine_increment(&self, request: &PublishRequest) -> Result<Determination> {
        request.validate_repository()?;

        let commits = self.git.commits_since_last_tag(
            &request.git_directory,
            &request.remote_target,
            &request.branch_name,
        )?;
        let infos: Vec<GitCommitVersionInfo> = commits
            .iter()
            .map(|commit| self.classifier.classify(commit))
            .collect();

        let current_version = self
            .store
            .latest_version(request.effective_target_directory(), request.search_mode)?;
        let increment = resolver::resolve(&infos, &current_version);
        info!(%increment, commits = commits.len(), version = %current_version, "Increment determined");

        let warnings = collect_warnings(request, &infos, increment);

        Ok(Determination {
            commits,
            infos,
            current_version,
            increment,
            warnings,
        })
    }

    /// Publish a caller-supplied increment
    pub fn publish_with_increment(
        &self,
        increment: VersionIncrement,
        request: &PublishRequest,
    ) -> Result<PublishOutcome> {
        request.validate()?;
        self.publisher().publish(increment, request)
    }

    /// Determine the increment from history, then publish it
    pub fn publish_with_determined_increment(
        &self,
        request: &PublishRequest,
    ) -> Result<WorkflowResult> {
        request.validate()?;
        let determination = self.determine_increment(request)?;
        let outcome = self
            .publisher()
            .publish(determination.increment, request)?;

        Ok(WorkflowResult {
            determination,
            outcome,
        })
    }

    fn publisher(&self) -> Publisher<'a, dyn GitPort + 'a, dyn VersionStore + 'a> {
        Publisher::new(self.git, self.store).with_cancel_token(self.cancel.clone())
    }
}

fn collect_warnings(
    request: &PublishRequest,
    infos: &[GitCommitVersionInfo],
    increment: VersionIncrement,
) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    if infos.is_empty() {
        warnings.push(BoundaryWarning::NoNewCommits {
            branch: request.branch_name.clone(),
        });
    }

    let unreadable = infos
        .iter()
        .filter(|info| info.increment == VersionIncrement::Unknown)
        .count();
    if unreadable > 0 {
        warnings.push(BoundaryWarning::UnreadableHints { count: unreadable });
    }

    let priority = resolver::priority_increment(infos.iter().map(|info| info.increment));
    if increment != priority {
        warnings.push(BoundaryWarning::PreReleaseDowngrade {
            from: priority,
            to: increment,
        });
    }

    warnings
}
