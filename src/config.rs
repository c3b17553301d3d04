//! Site configuration module.
//!
//! Handles loading and validating the optional `.polyblog.toml` file
//! at the root of the source tree. The file is hidden, so the scanner never
//! mistakes it for a post.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! author = "Bjorn Pagen"    # Byline on every post and index page
//! output_dir = "dist"       # Output directory, relative to the source root
//! git = "git"               # Version-control executable used for post dates
//! ```
//!
//! ## Partial Configuration
//!
//! The file is sparse: override just the values you want. Unknown keys are
//! rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the source root.
pub const CONFIG_FILE: &str = ".polyblog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `.polyblog.toml`.
///
/// Constructed once at startup and passed by reference to the pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Author shown on every generated page.
    pub author: String,
    /// Output directory, relative to the source root unless absolute.
    pub output_dir: PathBuf,
    /// Executable used for history lookups.
    pub git: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author: "Bjorn Pagen".to_string(),
            output_dir: PathBuf::from("dist"),
            git: "git".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.author.trim().is_empty() {
            return Err(ConfigError::Validation("author must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if starts_hidden(&self.output_dir) {
            return Err(ConfigError::Validation(
                "output_dir must not be a hidden directory".into(),
            ));
        }
        if self.git.trim().is_empty() {
            return Err(ConfigError::Validation("git must not be empty".into()));
        }
        Ok(())
    }

    /// Absolute (or source-relative) location of the output directory.
    pub fn output_root(&self, source: &Path) -> PathBuf {
        source.join(&self.output_dir)
    }
}

/// True when `path`, after any leading `./`, begins with a segment starting
/// with `.`. A leading `..` does not count.
fn starts_hidden(path: &Path) -> bool {
    path.components()
        .find(|c| !matches!(c, Component::CurDir))
        .is_some_and(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
}

/// Load config for a source tree, falling back to defaults when the file is
/// absent. Keys missing from the file keep their default values.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    let config: SiteConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}
