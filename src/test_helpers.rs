//! Shared test utilities for the polyblog test suite.
//!
//! Builds throwaway git repositories with deterministic commit dates so the
//! history lookup and the full pipeline can be exercised end to end.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let repo = GitRepo::new();
//! commit_file(&repo, "hello-world/en_US.md", "# Hello", 1136214245);
//!
//! let titles = read_output(&repo, "dist/en_US/index.html");
//! ```

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

// =========================================================================
// Repository setup
// =========================================================================

/// A git repository in a temporary directory, removed on drop.
pub struct GitRepo {
    dir: TempDir,
}

impl GitRepo {
    /// `git init` an empty repository.
    pub fn new() -> Self {
        let repo = GitRepo {
            dir: TempDir::new().unwrap(),
        };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run a git command inside the repository. Panics on failure.
    pub fn git(&self, args: &[&str]) {
        self.git_at(args, None);
    }

    /// Commit everything staged with both author and committer dates set to
    /// `epoch`.
    pub fn commit(&self, message: &str, epoch: i64) {
        self.git_at(&["commit", "-q", "-m", message], Some(epoch));
    }

    fn git_at(&self, args: &[&str], epoch: Option<i64>) {
        let mut cmd = Command::new("git");
        cmd.args([
            "-c",
            "user.name=Test Author",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(self.path());
        if let Some(epoch) = epoch {
            let date = format!("@{epoch} +0000");
            cmd.env("GIT_AUTHOR_DATE", &date)
                .env("GIT_COMMITTER_DATE", &date);
        }
        let output = cmd.output().unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =========================================================================
// Content helpers
// =========================================================================

/// Write a file (creating parent directories) without staging it.
pub fn write_file(repo: &GitRepo, rel: &str, contents: &str) {
    let path = repo.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Write, stage and commit a single file at `epoch`.
pub fn commit_file(repo: &GitRepo, rel: &str, contents: &str, epoch: i64) {
    write_file(repo, rel, contents);
    repo.git(&["add", "--", rel]);
    repo.commit(&format!("add {rel}"), epoch);
}

/// Remove a tracked file and commit the deletion at `epoch`.
pub fn remove_file(repo: &GitRepo, rel: &str, epoch: i64) {
    repo.git(&["rm", "-q", "--", rel]);
    repo.commit(&format!("remove {rel}"), epoch);
}

/// Read a generated file relative to the repository root.
pub fn read_output(repo: &GitRepo, rel: &str) -> String {
    let path = repo.path().join(rel);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()))
}
