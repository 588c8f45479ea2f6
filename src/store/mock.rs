use crate::domain::{SemanticVersion, VersionIncrement};
use crate::error::{GitBumpError, Result};
use crate::store::{SearchMode, VersionStore};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A call received by [MockVersionStore]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    LatestVersion {
        dir: PathBuf,
        mode: SearchMode,
    },
    ApplyIncrement {
        dir: PathBuf,
        mode: SearchMode,
        increment: VersionIncrement,
    },
}

/// In-memory version store for testing without touching files
pub struct MockVersionStore {
    version: Mutex<SemanticVersion>,
    frozen: bool,
    fail_apply: bool,
    calls: Mutex<Vec<StoreCall>>,
}

impl MockVersionStore {
    /// Store whose version moves when an increment is applied
    pub fn new(version: SemanticVersion) -> Self {
        MockVersionStore {
            version: Mutex::new(version),
            frozen: false,
            fail_apply: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Store that always reports the same version, even after applying
    pub fn frozen(version: SemanticVersion) -> Self {
        MockVersionStore {
            frozen: true,
            ..MockVersionStore::new(version)
        }
    }

    /// Make `apply_increment` fail
    pub fn failing_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn latest_version_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::LatestVersion { .. }))
            .count()
    }

    pub fn apply_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::ApplyIncrement { .. }))
            .count()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl VersionStore for MockVersionStore {
    fn latest_version(&self, dir: &Path, mode: SearchMode) -> Result<SemanticVersion> {
        lock(&self.calls).push(StoreCall::LatestVersion {
            dir: dir.to_path_buf(),
            mode,
        });
        Ok(lock(&self.version).clone())
    }

    fn apply_increment(
        &self,
        dir: &Path,
        mode: SearchMode,
        increment: VersionIncrement,
    ) -> Result<()> {
        lock(&self.calls).push(StoreCall::ApplyIncrement {
            dir: dir.to_path_buf(),
            mode,
            increment,
        });

        if self.fail_apply {
            return Err(GitBumpError::store("mock apply failure"));
        }

        if !self.frozen {
            let mut version = lock(&self.version);
            *version = version.bump(increment);
        }
        Ok(())
    }
}
