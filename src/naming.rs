//! Path parsing for the `<title>/<locale>.md` convention.
//!
//! Every post lives in a directory named after its title, with one markdown
//! file per translation named after the locale:
//!
//! ```text
//! my-first-post/
//! ├── en_US.md      → title "my first post", locale "en_US"
//! └── fr_FR.md      → title "my first post", locale "fr_FR"
//! ```
//!
//! ## Display Titles
//!
//! Dashes in the directory name are converted to spaces. The resulting title
//! doubles as the output file stem, so `my-first-post/en_US.md` is written to
//! `en_US/my first post.html`.

use thiserror::Error;

/// File suffix every post must carry.
pub const MARKDOWN_SUFFIX: &str = ".md";

#[derive(Error, Debug, PartialEq)]
pub enum ClassifyError {
    #[error("Malformed post path (expected <title>/<locale>.md): {0}")]
    MalformedPath(String),
    #[error("Not a markdown file: {0}")]
    NotMarkdown(String),
}

/// Title and locale parsed from a post path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    /// Directory name with dashes converted to spaces.
    pub title: String,
    /// Filename with the `.md` suffix stripped, e.g. `en_US`.
    pub locale: String,
}

/// Parse a `/`-separated relative path following the `<title>/<locale>.md`
/// convention.
///
/// - `"foo-bar/en_US.md"` → title="foo bar", locale="en_US"
/// - `"hello/de_DE.md"` → title="hello", locale="de_DE"
/// - `"README.md"` → [`ClassifyError::MalformedPath`]
/// - `"hello/notes.txt"` → [`ClassifyError::NotMarkdown`]
///
/// Only the first separator is significant; the remainder is taken as the
/// filename segment as-is.
pub fn classify(path: &str) -> Result<PostMetadata, ClassifyError> {
    let Some((dir, file)) = path.split_once('/') else {
        return Err(ClassifyError::MalformedPath(path.to_string()));
    };

    let title = dir.replace('-', " ");

    let locale = file
        .strip_suffix(MARKDOWN_SUFFIX)
        .ok_or_else(|| ClassifyError::NotMarkdown(path.to_string()))?;
    if locale.is_empty() {
        return Err(ClassifyError::MalformedPath(path.to_string()));
    }

    Ok(PostMetadata {
        title,
        locale: locale.to_string(),
    })
}

/// Two-letter language code for a locale tag (`en_US` → `en`).
///
/// Locales shorter than two characters are returned whole.
pub fn language_code(locale: &str) -> &str {
    match locale.char_indices().nth(2) {
        Some((end, _)) => &locale[..end],
        None => locale,
    }
}
