//! Cover image storage
//!
//! Covers are copied into the covers directory under their original file
//! name, and books refer to them by that name. A second cover with the same
//! name replaces the first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Accepted cover image extensions (compared case-insensitively)
pub const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Errors that can occur while importing a cover
#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Unsupported cover format '{path}'. Use a .jpg or .png image.")]
    UnsupportedFormat { path: PathBuf },

    #[error("Cover path '{path}' has no file name")]
    MissingFileName { path: PathBuf },

    #[error("Failed to copy cover '{from}' to '{to}': {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create covers directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory of cover images
pub struct CoverStore {
    dir: PathBuf,
}

impl CoverStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of a stored cover
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Copy an image into the covers directory
    ///
    /// Returns the file name to record on the book.
    pub fn import(&self, source: &Path) -> Result<String, CoverError> {
        if !is_supported_image(source) {
            return Err(CoverError::UnsupportedFormat {
                path: source.to_path_buf(),
            });
        }

        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoverError::MissingFileName {
                path: source.to_path_buf(),
            })?
            .to_string();

        fs::create_dir_all(&self.dir).map_err(|e| CoverError::CreateDirectory {
            path: self.dir.clone(),
            source: e,
        })?;

        let target = self.path_for(&file_name);
        fs::copy(source, &target).map_err(|e| CoverError::Copy {
            from: source.to_path_buf(),
            to: target.clone(),
            source: e,
        })?;

        info!("Imported cover {:?} as {}", source, file_name);
        Ok(file_name)
    }
}

/// Whether the path has an accepted image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            COVER_EXTENSIONS
                .iter()
                .any(|ext| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
