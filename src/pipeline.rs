//! Build driver: assets, discovery, index pages, then post pages.
//!
//! ```text
//! 0. Assets     static/   →  <out>/            (embedded files, byte for byte)
//! 1. Discover   <source>  →  files + indexes   (walk + classify)
//! 2. Indexes    indexes   →  <out>/<locale>/index.html
//! 3. Posts      files     →  <out>/<locale>/<title>.html
//! ```
//!
//! Everything runs sequentially and the first error ends the run. Nothing is
//! rolled back, so pages written before the failure stay on disk.
//!
//! Progress is reported through a callback rather than printed, keeping the
//! driver free of I/O beyond the files it writes; see [`crate::output`].

use crate::assets::{self, AssetError};
use crate::config::SiteConfig;
use crate::generate::{GenerateError, Generator};
use crate::history::HistoryResolver;
use crate::markdown::MarkdownRenderer;
use crate::scan::{self, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Cannot read source directory {path}: {source}")]
    SourceDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Source is not a directory: {0}")]
    SourceNotDir(PathBuf),
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Progress notifications emitted while building.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    AssetsCopied {
        count: usize,
        output: PathBuf,
    },
    Discovered {
        posts: usize,
        locales: usize,
    },
    IndexWritten {
        locale: String,
        titles: Vec<String>,
        path: PathBuf,
    },
    PostWritten {
        source: String,
        path: PathBuf,
    },
}

/// Totals for a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub assets: usize,
    pub locales: usize,
    pub posts: usize,
}

/// Build the site for the git work tree at `source`.
pub fn build(
    source: &Path,
    config: &SiteConfig,
    mut on_event: impl FnMut(&BuildEvent),
) -> Result<BuildSummary, BuildError> {
    let meta = fs::metadata(source).map_err(|e| BuildError::SourceDir {
        path: source.to_path_buf(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(BuildError::SourceNotDir(source.to_path_buf()));
    }

    let output = config.output_root(source);

    fs::create_dir_all(&output).map_err(|source| BuildError::OutputDir {
        path: output.clone(),
        source,
    })?;
    let assets = assets::copy_assets(&output)?;
    on_event(&BuildEvent::AssetsCopied {
        count: assets,
        output: output.clone(),
    });

    let discovery = scan::scan(source, &config.output_dir)?;
    on_event(&BuildEvent::Discovered {
        posts: discovery.files.len(),
        locales: discovery.indexes.len(),
    });

    let renderer = MarkdownRenderer::new();
    let history = HistoryResolver::new(config.git.as_str(), source);
    let generator = Generator::new(&config.author, source, &renderer, &history);

    for index in &discovery.indexes {
        let path = generator.generate_index(index, &output)?;
        on_event(&BuildEvent::IndexWritten {
            locale: index.locale.clone(),
            titles: index.titles.clone(),
            path,
        });
    }

    for file in &discovery.files {
        let path = generator.generate_post(file, &output)?;
        on_event(&BuildEvent::PostWritten {
            source: file.path().to_string(),
            path,
        });
    }

    Ok(BuildSummary {
        output,
        assets,
        locales: discovery.indexes.len(),
        posts: discovery.files.len(),
    })
}
