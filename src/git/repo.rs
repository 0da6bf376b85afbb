// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{CcError, GitError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository for reading commit messages.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CcError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                CcError::Git(GitError::NotARepository)
            } else {
                CcError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        tracing::debug!("Opened repository at {:?}", repo.path());
        Ok(Self { inner: repo })
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            CcError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            CcError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the commit message for a reference.
    pub fn get_commit_message(&self, reference: &str) -> Result<String> {
        let commit = self.get_commit(reference)?;
        let message = commit.message().ok_or_else(|| {
            CcError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;
        Ok(message.to_string())
    }

    /// Get commits in a range.
    ///
    /// `A..B` yields the commits reachable from `B` but not from `A`,
    /// newest first. A single reference yields only that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            let commit = self.get_commit(range)?;
            return Ok(vec![(
                commit.id(),
                commit.message().unwrap_or("").to_string(),
            )]);
        };

        let from = self.get_commit(from)?.id();
        let to = self.get_commit(to)?.id();

        let mut revwalk = self.revwalk()?;
        revwalk.push(to).map_err(|e| command_failed("revwalk.push", e))?;
        revwalk.hide(from).map_err(|e| command_failed("revwalk.hide", e))?;

        self.collect_messages(revwalk)
    }

    /// Get a commit and all of its ancestors, newest first.
    pub fn get_history(&self, reference: &str) -> Result<Vec<(Oid, String)>> {
        let start = self.get_commit(reference)?.id();

        let mut revwalk = self.revwalk()?;
        revwalk.push(start).map_err(|e| command_failed("revwalk.push", e))?;

        self.collect_messages(revwalk)
    }

    fn revwalk(&self) -> Result<git2::Revwalk<'_>> {
        self.inner.revwalk().map_err(|e| command_failed("revwalk", e))
    }

    fn collect_messages(&self, revwalk: git2::Revwalk<'_>) -> Result<Vec<(Oid, String)>> {
        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| command_failed("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                CcError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            let message = commit.message().unwrap_or("").to_string();
            commits.push((oid, message));
        }

        tracing::debug!("Collected {} commits", commits.len());
        Ok(commits)
    }
}

fn command_failed(command: &str, e: git2::Error) -> CcError {
    CcError::Git(GitError::CommandFailed {
        command: command.to_string(),
        message: e.message().to_string(),
    })
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parents: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn create_test_repo(messages: &[&str]) -> (TempDir, Repository, Vec<Oid>) {
        let dir = TempDir::new().unwrap();
        let ids = {
            let repo = Git2Repo::init(dir.path()).unwrap();
            messages.iter().map(|m| commit(&repo, m)).collect()
        };
        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper, ids)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _repo, _) = create_test_repo(&["Initial commit"]);
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(CcError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_commit_message() {
        let (_dir, repo, _) = create_test_repo(&["feat: [AB-1] first\n\nbody\n"]);
        let message = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(message, "feat: [AB-1] first\n\nbody\n");
    }

    #[test]
    fn test_invalid_reference() {
        let (_dir, repo, _) = create_test_repo(&["Initial commit"]);
        assert!(matches!(
            repo.get_commit("does-not-exist"),
            Err(CcError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_range_excludes_base() {
        let (_dir, repo, ids) = create_test_repo(&["one", "two", "three"]);
        let range = format!("{}..HEAD", ids[0]);
        let commits = repo.get_commits_in_range(&range).unwrap();
        let messages: Vec<&str> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["three", "two"]);
    }

    #[test]
    fn test_single_reference_range() {
        let (_dir, repo, ids) = create_test_repo(&["one", "two"]);
        let commits = repo.get_commits_in_range("HEAD").unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].0, ids[1]);
    }

    #[test]
    fn test_history() {
        let (_dir, repo, _) = create_test_repo(&["one", "two", "three"]);
        assert_eq!(repo.get_history("HEAD").unwrap().len(), 3);
        assert_eq!(repo.get_history("HEAD~1").unwrap().len(), 2);
    }
}
