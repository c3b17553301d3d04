//! Source tree discovery.
//!
//! First stage of the build. Walks the source directory to find every post
//! and groups post titles by locale for the index pages.
//!
//! ## Directory Structure
//!
//! ```text
//! blog/                            # Source root (a git work tree)
//! ├── .git/                        # Hidden: skipped
//! ├── .polyblog.toml               # Hidden: skipped (site config)
//! ├── dist/                        # Output directory: skipped
//! ├── hello-world/
//! │   ├── en_US.md                 # "hello world" in en_US
//! │   └── fr_FR.md                 # "hello world" in fr_FR
//! └── second-post/
//!     └── en_US.md
//! ```
//!
//! ## Rules
//!
//! - Any path whose first segment starts with `.` is ignored.
//! - Anything under the output directory is ignored.
//! - Every other regular file must follow `<title>/<locale>.md`; a single
//!   stray file aborts the build.
//!
//! The walk is sorted by file name, so discovery order (and therefore the order
//! of titles on each index page) is stable across runs and platforms.

use crate::naming::{self, ClassifyError};
use crate::types::LocaleIndex;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// A discovered file, relative to the source root, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Result of the discovery phase.
#[derive(Debug)]
pub struct Discovery {
    /// Every file found, in walk order.
    pub files: Vec<SourceFile>,
    /// One index per locale, sorted by locale tag.
    pub indexes: Vec<LocaleIndex>,
}

/// Walk `root` and group the posts found by locale.
///
/// `output_dir` is the build output directory, relative to `root` unless
/// absolute; it is skipped along with hidden entries.
pub fn scan(root: &Path, output_dir: &Path) -> Result<Discovery, ScanError> {
    let files = discover(root, output_dir)?;
    let indexes = group_by_locale(&files)?;
    Ok(Discovery { files, indexes })
}

/// List every regular file under `root`, skipping hidden top-level entries and
/// the output directory.
pub fn discover(root: &Path, output_dir: &Path) -> Result<Vec<SourceFile>, ScanError> {
    let root = canonical(root);
    let output = canonical(&root.join(output_dir));

    let mut files = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &root, &output));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(rel) = relative_slash_path(entry.path(), &root) {
            files.push(SourceFile::new(rel));
        }
    }
    Ok(files)
}

/// Accumulate titles per locale in discovery order.
///
/// Fails on the first file that does not follow the naming convention.
pub fn group_by_locale(files: &[SourceFile]) -> Result<Vec<LocaleIndex>, ScanError> {
    let mut groups: BTreeMap<String, LocaleIndex> = BTreeMap::new();
    for file in files {
        let meta = naming::classify(file.path())?;
        groups
            .entry(meta.locale.clone())
            .or_insert_with(|| LocaleIndex::new(meta.locale))
            .titles
            .push(meta.title);
    }
    Ok(groups.into_values().collect())
}

/// Absolute form of `path` with symlinks and `..` resolved, or `path` itself
/// when it does not exist yet.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// `root` and `output` must both come from [`canonical`] so that prefixes
/// compare on the same form.
fn is_excluded(entry: &DirEntry, root: &Path, output: &Path) -> bool {
    let Ok(rel) = entry.path().strip_prefix(root) else {
        return false;
    };
    if rel.as_os_str().is_empty() {
        return false;
    }
    let hidden = rel
        .components()
        .next()
        .is_some_and(|c| c.as_os_str().to_string_lossy().starts_with('.'));
    hidden || entry.path().starts_with(output)
}

fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "content").unwrap();
    }

    fn paths(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(SourceFile::path).collect()
    }

    #[test]
    fn groups_titles_by_locale_in_discovery_order() {
        let files = vec![
            SourceFile::new("foo-bar/en_US.md"),
            SourceFile::new("foo-bar/fr_FR.md"),
            SourceFile::new("baz/en_US.md"),
        ];
        let indexes = group_by_locale(&files).unwrap();

        assert_eq!(
            indexes,
            vec![
                LocaleIndex {
                    locale: "en_US".to_string(),
                    titles: vec!["foo bar".to_string(), "baz".to_string()],
                },
                LocaleIndex {
                    locale: "fr_FR".to_string(),
                    titles: vec!["foo bar".to_string()],
                },
            ]
        );
    }

    #[test]
    fn group_aborts_on_non_markdown() {
        let files = vec![
            SourceFile::new("foo/en_US.md"),
            SourceFile::new("foo/cover.png"),
        ];
        assert!(matches!(
            group_by_locale(&files),
            Err(ScanError::Classify(ClassifyError::NotMarkdown(_)))
        ));
    }

    #[test]
    fn group_aborts_on_top_level_file() {
        let files = vec![SourceFile::new("README.md")];
        assert!(matches!(
            group_by_locale(&files),
            Err(ScanError::Classify(ClassifyError::MalformedPath(_)))
        ));
    }

    #[test]
    fn group_empty_input() {
        assert!(group_by_locale(&[]).unwrap().is_empty());
    }

    #[test]
    fn discover_skips_hidden_and_output() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".git/config");
        touch(tmp.path(), ".polyblog.toml");
        touch(tmp.path(), "dist/index.html");
        touch(tmp.path(), "dist/en_US/old.html");
        touch(tmp.path(), "hello/en_US.md");
        touch(tmp.path(), "hello/fr_FR.md");

        let files = discover(tmp.path(), Path::new("dist")).unwrap();
        assert_eq!(paths(&files), vec!["hello/en_US.md", "hello/fr_FR.md"]);
    }

    #[test]
    fn discover_only_checks_first_segment_for_hidden() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "post/.notes.md");

        let files = discover(tmp.path(), Path::new("dist")).unwrap();
        assert_eq!(paths(&files), vec!["post/.notes.md"]);
    }

    #[test]
    fn discover_is_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "zeta/en_US.md");
        touch(tmp.path(), "alpha/en_US.md");
        touch(tmp.path(), "mid/de_DE.md");

        let files = discover(tmp.path(), Path::new("dist")).unwrap();
        assert_eq!(
            paths(&files),
            vec!["alpha/en_US.md", "mid/de_DE.md", "zeta/en_US.md"]
        );
    }

    #[test]
    fn discover_honors_nested_output_dir() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "public/site/en_US/index.html");
        touch(tmp.path(), "post/en_US.md");

        let files = discover(tmp.path(), Path::new("public/site")).unwrap();
        assert_eq!(paths(&files), vec!["post/en_US.md"]);
    }

    #[test]
    fn discover_skips_absolute_output_under_unnormalized_root() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "blog/post/en_US.md");
        touch(tmp.path(), "blog/site/en_US/index.html");

        // The walk root is spelled differently from the absolute output path.
        let root = tmp.path().join("blog/post/..");
        let output = tmp.path().join("blog/site");
        let files = discover(&root, &output).unwrap();
        assert_eq!(paths(&files), vec!["post/en_US.md"]);
    }

    #[test]
    fn discover_ignores_output_outside_root() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "blog/post/en_US.md");
        touch(tmp.path(), "site/en_US/index.html");

        let files = discover(&tmp.path().join("blog"), Path::new("../site")).unwrap();
        assert_eq!(paths(&files), vec!["post/en_US.md"]);
    }

    #[test]
    fn scan_excludes_hidden_from_indexes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".git/config");
        touch(tmp.path(), "dist/index.html");
        touch(tmp.path(), "foo-bar/en_US.md");
        touch(tmp.path(), "baz/en_US.md");

        let discovery = scan(tmp.path(), Path::new("dist")).unwrap();
        assert_eq!(discovery.files.len(), 2);
        assert_eq!(discovery.indexes.len(), 1);
        assert_eq!(discovery.indexes[0].titles, vec!["baz", "foo bar"]);
    }

    #[test]
    fn scan_fails_on_stray_file() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "hello/en_US.md");
        touch(tmp.path(), "LICENSE");

        assert!(matches!(
            scan(tmp.path(), Path::new("dist")),
            Err(ScanError::Classify(ClassifyError::MalformedPath(_)))
        ));
    }
}
