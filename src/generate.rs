//! HTML page generation.
//!
//! Turns discovered posts into pages on disk. Two kinds of page exist:
//!
//! - **Post pages** (`<out>/<locale>/<title>.html`): one per markdown file,
//!   carrying the author, localized creation date and rendered content
//! - **Index pages** (`<out>/<locale>/index.html`): one per locale, listing
//!   every post title in that locale
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── en_US/
//! │   ├── index.html
//! │   ├── foo bar.html
//! │   └── baz.html
//! └── fr_FR/
//!     ├── index.html
//!     └── foo bar.html
//! ```
//!
//! Existing files are overwritten. Two posts that resolve to the same locale
//! and title write the same file; the later one wins.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Everything is escaped except the markdown fragment, which is inserted as-is.

use crate::history::{HistoryError, HistoryResolver};
use crate::markdown::{MarkdownRenderer, RenderError};
use crate::naming::{self, ClassifyError};
use crate::scan::SourceFile;
use crate::types::{LocaleIndex, Post};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("Failed to render {path}: {source}")]
    Render { path: String, source: RenderError },
    #[error("Unknown locale {locale:?} in {path}")]
    UnknownLocale { locale: String, path: String },
}

/// Name of the per-locale index page.
pub const INDEX_FILE: &str = "index.html";

const STYLESHEET: &str = "/public/style.css";
const ICON: &str = "/public/images/icon.svg";

/// Everything needed to write pages, built once per run.
pub struct Generator<'a> {
    author: &'a str,
    source_root: &'a Path,
    renderer: &'a MarkdownRenderer,
    history: &'a HistoryResolver,
}

impl<'a> Generator<'a> {
    pub fn new(
        author: &'a str,
        source_root: &'a Path,
        renderer: &'a MarkdownRenderer,
        history: &'a HistoryResolver,
    ) -> Self {
        Self {
            author,
            source_root,
            renderer,
            history,
        }
    }

    /// Build the [`Post`] record for a source file without writing anything.
    pub fn build_post(&self, file: &SourceFile) -> Result<Post, GenerateError> {
        let meta = naming::classify(file.path())?;

        let source_path = self.source_root.join(file.path());
        let source = fs::read(&source_path).map_err(|source| GenerateError::Io {
            path: source_path,
            source,
        })?;

        let created_at = self.history.creation_date(file.path())?;

        let content_html =
            self.renderer
                .render(&source)
                .map_err(|source| GenerateError::Render {
                    path: file.path().to_string(),
                    source,
                })?;

        Ok(Post {
            author: self.author.to_string(),
            created_at,
            title: meta.title,
            content_html,
            locale: meta.locale,
        })
    }

    /// Render a post page to `<output_root>/<locale>/<title>.html`.
    ///
    /// Returns the path written.
    pub fn generate_post(
        &self,
        file: &SourceFile,
        output_root: &Path,
    ) -> Result<PathBuf, GenerateError> {
        let post = self.build_post(file)?;
        let page = render_post(&post).ok_or_else(|| GenerateError::UnknownLocale {
            locale: post.locale.clone(),
            path: file.path().to_string(),
        })?;

        let locale_dir = ensure_locale_dir(output_root, &post.locale)?;
        let out_path = locale_dir.join(format!("{}.html", post.title));
        write_page(&out_path, page)?;
        Ok(out_path)
    }

    /// Render a locale's index page to `<output_root>/<locale>/index.html`.
    pub fn generate_index(
        &self,
        index: &LocaleIndex,
        output_root: &Path,
    ) -> Result<PathBuf, GenerateError> {
        let locale_dir = ensure_locale_dir(output_root, &index.locale)?;
        let out_path = locale_dir.join(INDEX_FILE);
        write_page(&out_path, render_index(index, self.author))?;
        Ok(out_path)
    }
}

fn ensure_locale_dir(output_root: &Path, locale: &str) -> Result<PathBuf, GenerateError> {
    let dir = output_root.join(locale);
    fs::create_dir_all(&dir).map_err(|source| GenerateError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

fn write_page(path: &Path, page: Markup) -> Result<(), GenerateError> {
    fs::write(path, page.into_string()).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, author: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="author" content=(author);
                title { (title) }
                link rel="icon" href=(ICON) type="image/svg+xml";
                link rel="stylesheet" href=(STYLESHEET);
            }
            body {
                (content)
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a post page.
///
/// Returns `None` when the post's locale cannot be used for date formatting.
pub fn render_post(post: &Post) -> Option<Markup> {
    let created_human = post.created_human()?;

    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href=(INDEX_FILE) { (post.author) }
            }
        }
        main.post-page {
            article.post {
                header.post-header {
                    h1 { (post.title) }
                    p.byline {
                        span.author { (post.author) }
                        " · "
                        time datetime=(post.created_datetime()) { (created_human) }
                    }
                }
                div.post-content {
                    (PreEscaped(&post.content_html))
                }
            }
        }
    };

    Some(base_document(
        &post.title,
        post.language(),
        &post.author,
        content,
    ))
}

/// Renders a locale index page listing every title.
pub fn render_index(index: &LocaleIndex, author: &str) -> Markup {
    let content = html! {
        header.site-header {
            h1 { (author) }
            p.locale { (index.locale) }
        }
        main.index-page data-locale=(index.locale) {
            ul.post-list {
                @for title in &index.titles {
                    li {
                        a href={ (urlencoding::encode(title).into_owned()) ".html" } { (title) }
                    }
                }
            }
        }
    };

    base_document(author, index.language(), author, content)
}

// ============================================================================
// Tests
// ============================================================================
