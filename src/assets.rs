//! Static assets compiled into the binary.
//!
//! The stylesheet, site icon and `_redirects` manifest under `static/` are
//! embedded at compile time and written into every build's output directory,
//! keeping their relative layout:
//!
//! ```text
//! dist/
//! ├── _redirects
//! └── public/
//!     ├── style.css
//!     └── images/icon.svg
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to copy asset {asset} to {path}: {source}")]
    Copy {
        asset: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file embedded from `static/`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset {
    /// Path relative to the output root, `/`-separated.
    pub path: &'static str,
    pub contents: &'static [u8],
}

pub const ASSETS: &[EmbeddedAsset] = &[
    EmbeddedAsset {
        path: "_redirects",
        contents: include_bytes!("../static/_redirects"),
    },
    EmbeddedAsset {
        path: "public/style.css",
        contents: include_bytes!("../static/public/style.css"),
    },
    EmbeddedAsset {
        path: "public/images/icon.svg",
        contents: include_bytes!("../static/public/images/icon.svg"),
    },
];

/// Write every embedded asset under `output_dir`, overwriting existing files.
///
/// Returns the number of files written.
pub fn copy_assets(output_dir: &Path) -> Result<usize, AssetError> {
    for asset in ASSETS {
        let dst = output_dir.join(asset.path);
        let copy_err = |source| AssetError::Copy {
            asset: asset.path,
            path: dst.clone(),
            source,
        };
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(copy_err)?;
        }
        fs::write(&dst, asset.contents).map_err(copy_err)?;
    }
    Ok(ASSETS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn assets_copied_byte_for_byte() {
        let tmp = TempDir::new().unwrap();
        let count = copy_assets(tmp.path()).unwrap();
        assert_eq!(count, ASSETS.len());

        for asset in ASSETS {
            let written = fs::read(tmp.path().join(asset.path)).unwrap();
            assert_eq!(written, asset.contents, "{} differs", asset.path);
        }
    }

    #[test]
    fn assets_keep_directory_structure() {
        let tmp = TempDir::new().unwrap();
        copy_assets(tmp.path()).unwrap();
        assert!(tmp.path().join("_redirects").is_file());
        assert!(tmp.path().join("public/style.css").is_file());
        assert!(tmp.path().join("public/images/icon.svg").is_file());
    }

    #[test]
    fn assets_overwrite_existing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("public")).unwrap();
        fs::write(tmp.path().join("public/style.css"), "old").unwrap();

        copy_assets(tmp.path()).unwrap();
        let css = fs::read(tmp.path().join("public/style.css")).unwrap();
        assert_ne!(css, b"old");
    }

    #[test]
    fn copy_into_file_path_is_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocked");
        fs::write(&blocker, "not a dir").unwrap();

        assert!(matches!(
            copy_assets(&blocker),
            Err(AssetError::Copy { .. })
        ));
    }

    #[test]
    fn asset_paths_are_relative() {
        for asset in ASSETS {
            assert!(!asset.path.starts_with('/'));
            assert!(!asset.contents.is_empty());
        }
    }
}
