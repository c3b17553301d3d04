//! # polyblog
//!
//! Builds a multilingual static blog out of a git repository of markdown
//! posts. The repository layout is the whole data model: each directory is a
//! post, each `<locale>.md` file inside it is one translation, and git history
//! supplies the publication date.
//!
//! ```text
//! blog/
//! ├── hello-world/
//! │   ├── en_US.md     →  dist/en_US/hello world.html
//! │   └── fr_FR.md     →  dist/fr_FR/hello world.html
//! └── second-post/
//!     └── en_US.md     →  dist/en_US/second post.html
//!                         dist/en_US/index.html, dist/fr_FR/index.html
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `<title>/<locale>.md` path parser and language-code helper |
//! | [`history`] | Creation dates from the commit that first added a file |
//! | [`markdown`] | pulldown-cmark rendering with wiki links and heading ids |
//! | [`types`] | `Post` and `LocaleIndex` records, localized date formatting |
//! | [`generate`] | Post and index pages rendered with Maud |
//! | [`scan`] | Source tree walk and per-locale grouping |
//! | [`assets`] | Stylesheet, icon and `_redirects` embedded in the binary |
//! | [`pipeline`] | Runs assets → discovery → indexes → posts |
//! | [`config`] | Optional `.polyblog.toml` loading and validation |
//! | [`output`] | CLI progress formatting |
//!
//! # Design Decisions
//!
//! ## Git Is the Date Source
//!
//! Posts carry no front matter. The date shown on a post is the commit time of
//! the commit that added its file, so publishing is just committing. A rename
//! counts as a new addition, matching how the scanner only sees current paths.
//!
//! ## Fail Fast
//!
//! The first error of any kind ends the build. There is no per-file skip and no
//! rollback; the output directory is disposable and the next successful build
//! overwrites it.
//!
//! ## No Global State
//!
//! The markdown renderer, history resolver and page generator are plain values
//! built once per run by [`pipeline::build`] and passed by reference.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time, interpolation is escaped by default, and there is
//! no template directory to ship alongside the binary.

pub mod assets;
pub mod config;
pub mod generate;
pub mod history;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
