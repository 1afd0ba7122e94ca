//! Library file persistence
//!
//! Saves and loads the whole collection as a JSON array. Every save rewrites
//! the file in full using an atomic write (temp file, fsync, rename), so the
//! library is never left half-written.
//!
//! Storage location: `~/.local/share/shelf/library.json` (configurable via
//! `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::error::{StorageError, StorageResult};
use crate::models::Book;

/// Indentation used for library and export files
const JSON_INDENT: &[u8] = b"    ";

/// Persistence layer for the library file
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for the given library file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the library file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the collection
    ///
    /// A missing file is an empty collection. A file that exists but does
    /// not parse is reported as `CorruptStore` and left as is.
    pub fn load(&self) -> StorageResult<Vec<Book>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No library file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::from_read(e, self.path.clone())),
        };

        let books: Vec<Book> =
            serde_json::from_str(&content).map_err(|e| StorageError::CorruptStore {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        debug!("Loaded {} book(s) from {:?}", books.len(), self.path);
        Ok(books)
    }

    /// Save the full collection, replacing the file
    pub fn save(&self, books: &[Book]) -> StorageResult<()> {
        let bytes = to_pretty_json(books)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} book(s) to {:?}", books.len(), self.path);
        Ok(())
    }
}

/// Serialize with the 4-space indent used by library and export files
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
