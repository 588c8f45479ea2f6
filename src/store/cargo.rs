use crate::domain::{SemanticVersion, VersionIncrement};
use crate::error::{GitBumpError, Result};
use crate::store::{SearchMode, VersionStore};
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Value};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const MANIFEST_NAME: &str = "Cargo.toml";

/// Key paths that may hold a literal version string
const VERSION_KEYS: [&[&str]; 2] = [&["package", "version"], &["workspace", "package", "version"]];

/// Version store backed by `Cargo.toml` manifests.
///
/// Every literal `package.version` and `workspace.package.version` is
/// considered; inherited versions (`version.workspace = true`) are left alone.
/// Applying an increment moves every literal version to the bumped latest
/// version, keeping the rest of each manifest byte-for-byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoManifestStore;

struct Manifest {
    path: PathBuf,
    document: DocumentMut,
}

impl CargoManifestStore {
    pub fn new() -> Self {
        CargoManifestStore
    }

    /// Manifest paths under `dir`, sorted
    pub fn manifest_paths(&self, dir: &Path, mode: SearchMode) -> Result<Vec<PathBuf>> {
        let mut paths = match mode {
            SearchMode::TopLevel => {
                let path = dir.join(MANIFEST_NAME);
                if path.is_file() {
                    vec![path]
                } else {
                    Vec::new()
                }
            }
            SearchMode::Recursive => {
                let mut found = Vec::new();
                let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
                    entry.depth() == 0
                        || !(entry.file_type().is_dir()
                            && matches!(entry.file_name().to_str(), Some("target" | ".git")))
                });

                for entry in walker {
                    let entry = entry.map_err(|e| {
                        GitBumpError::store(format!("Cannot walk '{}': {}", dir.display(), e))
                    })?;
                    if entry.file_type().is_file() && entry.file_name() == MANIFEST_NAME {
                        found.push(entry.into_path());
                    }
                }
                found
            }
        };

        paths.sort();
        Ok(paths)
    }

    fn load_manifests(&self, dir: &Path, mode: SearchMode) -> Result<Vec<Manifest>> {
        self.manifest_paths(dir, mode)?
            .into_iter()
            .map(|path| -> Result<Manifest> {
                let content = fs::read_to_string(&path)?;
                let document = content.parse::<DocumentMut>()?;
                Ok(Manifest { path, document })
            })
            .collect()
    }

    fn latest_of(&self, dir: &Path, manifests: &[Manifest]) -> Result<SemanticVersion> {
        let mut latest: Option<SemanticVersion> = None;

        for manifest in manifests {
            for keys in VERSION_KEYS {
                let Some(raw) = read_version(&manifest.document, keys) else {
                    continue;
                };
                match SemanticVersion::parse(raw) {
                    Ok(version) => {
                        debug!(path = %manifest.path.display(), %version, "Found manifest version");
                        if latest.as_ref().map_or(true, |current| version > *current) {
                            latest = Some(version);
                        }
                    }
                    Err(e) => {
                        warn!(path = %manifest.path.display(), error = %e, "Skipping unreadable version")
                    }
                }
            }
        }

        latest.ok_or_else(|| {
            GitBumpError::store(format!(
                "No versioned {} found in '{}'",
                MANIFEST_NAME,
                dir.display()
            ))
        })
    }
}

impl VersionStore for CargoManifestStore {
    fn latest_version(&self, dir: &Path, mode: SearchMode) -> Result<SemanticVersion> {
        let manifests = self.load_manifests(dir, mode)?;
        self.latest_of(dir, &manifests)
    }

    fn apply_increment(
        &self,
        dir: &Path,
        mode: SearchMode,
        increment: VersionIncrement,
    ) -> Result<()> {
        let mut manifests = self.load_manifests(dir, mode)?;
        let latest = self.latest_of(dir, &manifests)?;
        let next = latest.bump(increment).to_string();

        for manifest in &mut manifests {
            let mut changed = false;
            for keys in VERSION_KEYS {
                changed |= write_version(&mut manifest.document, keys, &next).is_some();
            }

            if changed {
                fs::write(&manifest.path, manifest.document.to_string())?;
                debug!(path = %manifest.path.display(), version = %next, "Rewrote manifest");
            }
        }

        info!(from = %latest, to = %next, %increment, "Applied increment to manifests");
        Ok(())
    }
}

fn read_version<'a>(document: &'a DocumentMut, keys: &[&str]) -> Option<&'a str> {
    let mut item = document.as_item();
    for key in keys {
        item = item.get(*key)?;
    }
    item.as_str()
}

fn write_version(document: &mut DocumentMut, keys: &[&str], version: &str) -> Option<()> {
    let mut item = document.as_item_mut();
    for key in keys {
        item = item.get_mut(*key)?;
    }

    let value = item.as_value_mut()?;
    if !value.is_str() {
        return None;
    }

    let decor = value.decor().clone();
    *value = Value::from(version);
    *value.decor_mut() = decor;
    Some(())
}
