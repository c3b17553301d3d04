//! Post creation dates from git history.
//!
//! A post's published date is the commit time of the commit that first added
//! its file. The lookup shells out to git:
//!
//! ```text
//! git -c log.showRoot=true log --no-renames --diff-filter=A --format=%ct -- <path>
//! ```
//!
//! - `--diff-filter=A` keeps only commits that added the path.
//! - `--no-renames` makes a rename show up as an addition of the new path,
//!   matching the scanner, which only ever sees current working-tree paths.
//! - `log.showRoot` is forced on so files added in the root commit are found
//!   regardless of user config.
//!
//! Output is newest first; a file that was deleted and re-added yields several
//! lines and the last one (the earliest addition) wins.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("History lookup for {path} failed ({status}): {stderr}")]
    CommandFailed {
        path: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("No commit adds {0}; is it tracked?")]
    NotTracked(String),
    #[error("Invalid commit timestamp {output:?}: {reason}")]
    TimestampParse { output: String, reason: String },
}

/// Resolves creation dates for paths inside one git work tree.
#[derive(Debug, Clone)]
pub struct HistoryResolver {
    program: String,
    repo_root: PathBuf,
}

impl HistoryResolver {
    pub fn new(program: impl Into<String>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            repo_root: repo_root.into(),
        }
    }

    /// Commit time of the earliest commit that added `path` (relative to the
    /// repo root).
    pub fn creation_date(&self, path: &str) -> Result<DateTime<Utc>, HistoryError> {
        let output = Command::new(&self.program)
            .args([
                "-c",
                "log.showRoot=true",
                "log",
                "--no-renames",
                "--diff-filter=A",
                "--format=%ct",
                "--",
                path,
            ])
            .current_dir(&self.repo_root)
            .output()
            .map_err(|source| HistoryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(HistoryError::CommandFailed {
                path: path.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(HistoryError::NotTracked(path.to_string()));
        }
        parse_timestamp(&stdout)
    }
}

/// Parse `%ct` output into a UTC timestamp, taking the earliest (last) line.
pub fn parse_timestamp(output: &str) -> Result<DateTime<Utc>, HistoryError> {
    let earliest = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .unwrap_or_default();

    let secs: i64 = earliest
        .parse()
        .map_err(|e: std::num::ParseIntError| HistoryError::TimestampParse {
            output: output.trim().to_string(),
            reason: e.to_string(),
        })?;

    DateTime::from_timestamp(secs, 0).ok_or_else(|| HistoryError::TimestampParse {
        output: output.trim().to_string(),
        reason: "out of range".to_string(),
    })
}
