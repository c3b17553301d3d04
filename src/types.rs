//! Records handed from the pipeline to the page templates.

use crate::naming::language_code;
use chrono::{DateTime, Locale, Utc};

/// Long-form byline date, e.g. "January 2 2006".
const HUMAN_DATE_FORMAT: &str = "%B %-d %Y";
/// Machine-readable timestamp for `<time datetime>`, always UTC.
const MACHINE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// A single rendered post, ready for templating.
#[derive(Debug, Clone)]
pub struct Post {
    pub author: String,
    /// Commit time of the commit that first added the post.
    pub created_at: DateTime<Utc>,
    pub title: String,
    /// Rendered markdown fragment, inserted into the page verbatim.
    pub content_html: String,
    /// Locale tag from the filename, e.g. `en_US`.
    pub locale: String,
}

impl Post {
    /// Two-letter language code for `<html lang>`.
    pub fn language(&self) -> &str {
        language_code(&self.locale)
    }

    /// Creation date with month names in the post's locale.
    ///
    /// Returns `None` when the locale tag is not one the formatter knows.
    pub fn created_human(&self) -> Option<String> {
        let locale = Locale::try_from(self.locale.as_str()).ok()?;
        Some(
            self.created_at
                .format_localized(HUMAN_DATE_FORMAT, locale)
                .to_string(),
        )
    }

    pub fn created_datetime(&self) -> String {
        self.created_at.format(MACHINE_DATE_FORMAT).to_string()
    }
}

/// Titles of every post written in one locale, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleIndex {
    pub locale: String,
    pub titles: Vec<String>,
}

impl LocaleIndex {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            titles: Vec::new(),
        }
    }

    pub fn language(&self) -> &str {
        language_code(&self.locale)
    }
}
