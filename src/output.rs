//! CLI output formatting for build progress.
//!
//! # Information-First Display
//!
//! Each line leads with what was produced (locale, post title) and shows the
//! file written as secondary context, relative to the output root:
//!
//! ```text
//! ==> Assets: 3 files → dist
//! ==> Discovered 3 posts in 2 locales
//! en_US (2 posts) → en_US/index.html
//!     001 foo bar
//!     002 baz
//! fr_FR (1 post) → fr_FR/index.html
//!     001 foo bar
//! Post foo bar [en_US] → en_US/foo bar.html
//! Post foo bar [fr_FR] → fr_FR/foo bar.html
//! Post baz [en_US] → en_US/baz.html
//! ==> Build complete: 3 posts, 2 locales → dist
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O, so they can be
//! tested directly; `print_*` wrappers write them to stdout.

use crate::naming;
use crate::pipeline::{BuildEvent, BuildSummary};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Display a written path relative to the output root when possible.
fn display_path(path: &Path, output_root: &Path) -> String {
    path.strip_prefix(output_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Format one build event. `output_root` shortens written paths.
pub fn format_build_event(event: &BuildEvent, output_root: &Path) -> Vec<String> {
    match event {
        BuildEvent::AssetsCopied { count, output } => vec![format!(
            "==> Assets: {} → {}",
            plural(*count, "file", "files"),
            output.display()
        )],
        BuildEvent::Discovered { posts, locales } => vec![format!(
            "==> Discovered {} in {}",
            plural(*posts, "post", "posts"),
            plural(*locales, "locale", "locales")
        )],
        BuildEvent::IndexWritten {
            locale,
            titles,
            path,
        } => {
            let mut lines = vec![format!(
                "{} ({}) → {}",
                locale,
                plural(titles.len(), "post", "posts"),
                display_path(path, output_root)
            )];
            for (i, title) in titles.iter().enumerate() {
                lines.push(format!("    {} {}", format_index(i + 1), title));
            }
            lines
        }
        BuildEvent::PostWritten { source, path } => {
            let label = match naming::classify(source) {
                Ok(meta) => format!("{} [{}]", meta.title, meta.locale),
                Err(_) => source.clone(),
            };
            vec![format!(
                "Post {} → {}",
                label,
                display_path(path, output_root)
            )]
        }
    }
}

pub fn print_build_event(event: &BuildEvent, output_root: &Path) {
    for line in format_build_event(event, output_root) {
        println!("{}", line);
    }
}

/// Format the closing line of a successful build.
pub fn format_summary(summary: &BuildSummary) -> Vec<String> {
    vec![format!(
        "==> Build complete: {}, {} → {}",
        plural(summary.posts, "post", "posts"),
        plural(summary.locales, "locale", "locales"),
        summary.output.display()
    )]
}

pub fn print_summary(summary: &BuildSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
