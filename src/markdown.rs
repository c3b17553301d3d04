//! Markdown to HTML conversion.
//!
//! Wraps pulldown-cmark with the extension set posts are written against:
//!
//! - **Tables** and `~~strikethrough~~`
//! - **Typographic punctuation**: straight quotes become curly, `--` and `---`
//!   become en and em dashes
//! - **Wiki links**: `[[Some Post]]` links to `Some Post.html`, which is where
//!   the post generator writes a post with that title in the same locale
//! - **Heading ids**: every heading gets an `id` derived from its text so
//!   sections can be linked to
//!
//! Rendering is a pure function of the input bytes. Heading ids are
//! deduplicated per document with `-1`, `-2`, ... suffixes in document order.

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, html::push_html};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Markdown source is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Immutable markdown renderer, built once and shared by reference.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_SMART_PUNCTUATION
                | Options::ENABLE_WIKILINKS,
        }
    }

    /// Render markdown bytes to an HTML fragment.
    pub fn render(&self, source: &[u8]) -> Result<String, RenderError> {
        let text = std::str::from_utf8(source)?;
        let parser = Parser::new_ext(text, self.options);
        let events = resolve_wiki_links(assign_heading_ids(parser));

        let mut html = String::with_capacity(text.len() * 2);
        push_html(&mut html, events.into_iter());
        Ok(html)
    }
}

/// Turn heading text into an id: lowercase alphanumerics and `_` are kept,
/// spaces and dashes become `-`, everything else is dropped.
fn heading_slug(text: &str) -> String {
    let slug: String = text
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() => Some(c.to_lowercase().next().unwrap_or(c)),
            ' ' | '-' => Some('-'),
            '_' => Some('_'),
            _ => None,
        })
        .collect();
    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug
    }
}

/// Hands out unique heading ids for one document.
///
/// `seen` maps every id handed out to the next suffix to try for it.
#[derive(Default)]
struct HeadingIds {
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    fn unique(&mut self, base: String) -> String {
        let Some(&start) = self.seen.get(&base) else {
            self.seen.insert(base.clone(), 1);
            return base;
        };
        let mut n = start;
        let mut id = format!("{base}-{n}");
        while self.seen.contains_key(&id) {
            n += 1;
            id = format!("{base}-{n}");
        }
        self.seen.insert(base, n + 1);
        self.seen.insert(id.clone(), 1);
        id
    }
}

/// Buffer each heading until its end so its text can be turned into an id,
/// then patch the id into the opening tag.
fn assign_heading_ids<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events: Vec<Event<'a>> = Vec::new();
    let mut ids = HeadingIds::default();
    let mut heading: Option<Vec<Event<'a>>> = None;
    let mut heading_text = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                heading_text.clear();
                heading = Some(vec![event]);
            }
            Event::End(TagEnd::Heading(_)) => {
                let mut buffered = heading.take().unwrap_or_default();
                if let Some(Event::Start(Tag::Heading { id, .. })) = buffered.first_mut() {
                    let base = match id.take() {
                        Some(explicit) => explicit.to_string(),
                        None => heading_slug(&heading_text),
                    };
                    *id = Some(CowStr::from(ids.unique(base)));
                }
                events.extend(buffered);
                events.push(event);
            }
            Event::Text(ref text) | Event::Code(ref text) if heading.is_some() => {
                heading_text.push_str(text);
                if let Some(buffered) = heading.as_mut() {
                    buffered.push(event);
                }
            }
            _ => match heading.as_mut() {
                Some(buffered) => buffered.push(event),
                None => events.push(event),
            },
        }
    }
    events
}

/// Point wiki links at the generated page for their target.
///
/// - `[[Post]]` → `Post.html`
/// - `[[Post#part]]` → `Post.html#part`
/// - `[[#part]]` → `#part`
fn resolve_wiki_links(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Link {
                link_type: link_type @ LinkType::WikiLink { .. },
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::from(wiki_target(&dest_url)),
                title,
                id,
            }),
            other => other,
        })
        .collect()
}

fn wiki_target(target: &str) -> String {
    let (page, fragment) = match target.split_once('#') {
        Some((page, fragment)) => (page, Some(fragment)),
        None => (target, None),
    };
    let mut href = String::new();
    if !page.is_empty() {
        href.push_str(page);
        href.push_str(".html");
    }
    if let Some(fragment) = fragment {
        href.push('#');
        href.push_str(fragment);
    }
    href
}
