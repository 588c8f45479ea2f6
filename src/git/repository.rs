use crate::domain::{FileInfo, FileStatus, GitCommit};
use crate::error::{GitBumpError, Result};
use crate::git::GitPort;
use git2::{Delta, IndexAddOption, Oid, Repository, Signature, Sort};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// [GitPort] backed by libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Port;

impl Git2Port {
    pub fn new() -> Self {
        Git2Port
    }

    fn open(dir: &Path) -> Result<Repository> {
        Repository::open(dir).map_err(|e| {
            GitBumpError::validation(format!(
                "'{}' is not a git repository: {}",
                dir.display(),
                e
            ))
        })
    }

    fn branch_tip(repo: &Repository, remote: &str, branch: &str) -> Result<Oid> {
        let candidates = [
            format!("refs/heads/{}", branch),
            format!("refs/remotes/{}/{}", remote, branch),
        ];

        for name in &candidates {
            if let Ok(reference) = repo.find_reference(name) {
                let commit = reference.peel_to_commit()?;
                debug!(reference = %name, "Using branch tip");
                return Ok(commit.id());
            }
        }

        warn!(branch, remote, "Branch not found, falling back to HEAD");
        Ok(repo.head()?.peel_to_commit()?.id())
    }

    fn tagged_commits(repo: &Repository) -> Result<HashSet<Oid>> {
        let mut tagged = HashSet::new();
        let tags = repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            let Ok(reference) = repo.find_reference(&format!("refs/tags/{}", tag_name)) else {
                continue;
            };
            // Tags on non-commit objects are ignored.
            if let Ok(commit) = reference.peel_to_commit() {
                tagged.insert(commit.id());
            }
        }

        Ok(tagged)
    }

    fn changed_files(repo: &Repository, commit: &git2::Commit<'_>) -> Result<Vec<FileInfo>> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parents().next() {
            Some(parent) => Some(parent.tree()?),
            None => None,
        };

        let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
        let files = diff
            .deltas()
            .filter_map(|delta| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())?;
                let status = match delta.status() {
                    Delta::Added => FileStatus::Added,
                    Delta::Modified => FileStatus::Modified,
                    Delta::Deleted => FileStatus::Deleted,
                    Delta::Renamed => FileStatus::Renamed,
                    _ => FileStatus::Other,
                };
                Some(FileInfo::new(path.to_string_lossy(), status))
            })
            .collect();

        Ok(files)
    }

    fn signature(repo: &Repository, author_email: &str) -> Result<Signature<'static>> {
        let name = repo
            .config()
            .and_then(|config| config.get_string("user.name"))
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                author_email
                    .split('@')
                    .next()
                    .unwrap_or(author_email)
                    .to_string()
            });

        Ok(Signature::now(&name, author_email)?)
    }
}

fn to_git_commit(commit: &git2::Commit<'_>) -> GitCommit {
    let message = commit.message().unwrap_or("(empty message)");
    GitCommit::with_message(commit.id().to_string(), message)
}

/// Credentials for fetch and push: SSH keys, the SSH agent, then git's
/// credential helpers, then libgit2 defaults.
fn credential_callbacks<'a>(repo: &'a Repository) -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }

            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = Path::new(&home).join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }

        if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(config) = repo.config() {
                if let Ok(cred) = git2::Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }

        git2::Cred::default()
    });

    callbacks
}

impl GitPort for Git2Port {
    fn get_commits(&self, dir: &Path) -> Result<Vec<GitCommit>> {
        let repo = Self::open(dir)?;
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            commits.push(to_git_commit(&commit));
        }

        debug!(count = commits.len(), "Read commit history");
        Ok(commits)
    }

    fn commits_since_last_tag(
        &self,
        dir: &Path,
        remote: &str,
        branch: &str,
    ) -> Result<Vec<GitCommit>> {
        let repo = Self::open(dir)?;
        let tip = Self::branch_tip(&repo, remote, branch)?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;
        revwalk.push(tip)?;
        for tagged in Self::tagged_commits(&repo)? {
            revwalk.hide(tagged)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let files = Self::changed_files(&repo, &commit)?;
            commits.push(to_git_commit(&commit).with_files(files));
        }

        debug!(count = commits.len(), branch, "Collected commits since last tag");
        Ok(commits)
    }

    fn commit_changes(&self, dir: &Path, message: &str, author_email: &str) -> Result<String> {
        let repo = Self::open(dir)?;

        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let signature = Self::signature(&repo, author_email)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        info!(commit = %oid, "Committed changes");
        Ok(oid.to_string())
    }

    fn create_tag(&self, dir: &Path, tag_name: &str, commit_id: &str) -> Result<()> {
        let repo = Self::open(dir)?;

        let oid = Oid::from_str(commit_id)
            .map_err(|e| GitBumpError::tag(format!("Invalid commit id '{}': {}", commit_id, e)))?;
        let object = repo
            .find_object(oid, None)
            .map_err(|e| GitBumpError::tag(format!("Cannot find object: {}", e)))?;

        repo.tag_lightweight(tag_name, &object, false)
            .map_err(|e| GitBumpError::tag(format!("Cannot create tag '{}': {}", tag_name, e)))?;

        info!(tag = tag_name, commit = commit_id, "Created tag");
        Ok(())
    }

    fn push_remote(&self, dir: &Path, remote: &str, refspec: &str) -> Result<()> {
        let repo = Self::open(dir)?;
        let mut remote_handle = repo
            .find_remote(remote)
            .map_err(|_| GitBumpError::remote(format!("No remote named '{}' found", remote)))?;

        let mut rejection: Option<String> = None;
        let push_result = {
            let mut callbacks = credential_callbacks(&repo);
            callbacks.push_update_reference(|refname, status| {
                if let Some(status) = status {
                    rejection = Some(format!("{} rejected: {}", refname, status));
                }
                Ok(())
            });

            let mut push_options = git2::PushOptions::new();
            push_options.remote_callbacks(callbacks);
            remote_handle.push(&[refspec], Some(&mut push_options))
        };

        if let Err(e) = push_result {
            let message = match e.class() {
                git2::ErrorClass::Net => format!("Network error during push: {}", e),
                git2::ErrorClass::Reference => format!("Reference error during push: {}", e),
                _ => format!("Failed to push '{}': {}", refspec, e),
            };
            return Err(GitBumpError::remote(message));
        }

        if let Some(reason) = rejection {
            return Err(GitBumpError::remote(reason));
        }

        info!(remote, refspec, "Pushed ref");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@test.com").unwrap();
        }
        (dir, repo)
    }

    fn commit_file(dir: &Path, name: &str, message: &str) -> String {
        fs::write(dir.join(name), message).unwrap();
        Git2Port::new()
            .commit_changes(dir, message, "test@test.com")
            .unwrap()
    }

    #[test]
    fn test_open_non_repository() {
        let dir = TempDir::new().unwrap();
        let err = Git2Port::new().get_commits(dir.path()).unwrap_err();
        assert!(matches!(err, GitBumpError::Validation(_)));
    }

    #[test]
    fn test_commit_changes_on_unborn_branch() {
        let (dir, repo) = init_repo();
        let id = commit_file(dir.path(), "a.txt", "feat: first");

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.id().to_string(), id);
        assert_eq!(head.parent_count(), 0);
        assert_eq!(head.author().email(), Some("test@test.com"));
    }

    #[test]
    fn test_get_commits_newest_first() {
        let (dir, _repo) = init_repo();
        commit_file(dir.path(), "a.txt", "feat: first");
        commit_file(dir.path(), "b.txt", "fix: second\n\nbody");

        let commits = Git2Port::new().get_commits(dir.path()).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].subject, "fix: second");
        assert_eq!(commits[1].subject, "feat: first");
    }

    #[test]
    fn test_commits_since_last_tag() {
        let (dir, _repo) = init_repo();
        let port = Git2Port::new();
        let first = commit_file(dir.path(), "a.txt", "feat: first");
        port.create_tag(dir.path(), "v0.1.0", &first).unwrap();
        commit_file(dir.path(), "b.txt", "fix: second");
        commit_file(dir.path(), "c.txt", "feat: third");

        let branch = {
            let repo = Repository::open(dir.path()).unwrap();
            let head = repo.head().unwrap();
            head.shorthand().unwrap().to_string()
        };

        let commits = port
            .commits_since_last_tag(dir.path(), "origin", &branch)
            .unwrap();
        let subjects: Vec<_> = commits.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["fix: second", "feat: third"]);
        assert_eq!(commits[0].changed_files[0].path, "b.txt");
        assert_eq!(commits[0].changed_files[0].status, FileStatus::Added);
    }

    #[test]
    fn test_create_tag_duplicate_fails() {
        let (dir, _repo) = init_repo();
        let port = Git2Port::new();
        let id = commit_file(dir.path(), "a.txt", "feat: first");
        port.create_tag(dir.path(), "v1.0.0", &id).unwrap();

        let err = port.create_tag(dir.path(), "v1.0.0", &id).unwrap_err();
        assert!(matches!(err, GitBumpError::Tag(_)));
    }

    #[test]
    fn test_push_to_bare_remote() {
        let (dir, repo) = init_repo();
        let remote_dir = TempDir::new().unwrap();
        Repository::init_bare(remote_dir.path()).unwrap();
        repo.remote("origin", remote_dir.path().to_str().unwrap())
            .unwrap();

        let port = Git2Port::new();
        let id = commit_file(dir.path(), "a.txt", "feat: first");
        port.create_tag(dir.path(), "v0.1.0", &id).unwrap();

        let branch = repo.head().unwrap().shorthand().unwrap().to_string();
        port.push_remote(dir.path(), "origin", &format!("refs/heads/{}", branch))
            .unwrap();
        port.push_remote(dir.path(), "origin", "refs/tags/v0.1.0")
            .unwrap();

        let remote_repo = Repository::open_bare(remote_dir.path()).unwrap();
        assert!(remote_repo.find_reference("refs/tags/v0.1.0").is_ok());
        assert!(remote_repo
            .find_reference(&format!("refs/heads/{}", branch))
            .is_ok());
    }

    #[test]
    fn test_push_unknown_remote() {
        let (dir, _repo) = init_repo();
        commit_file(dir.path(), "a.txt", "feat: first");
        let err = Git2Port::new()
            .push_remote(dir.path(), "nowhere", "refs/heads/main")
            .unwrap_err();
        assert!(matches!(err, GitBumpError::Remote(_)));
    }
}
