//! Unified storage interface
//!
//! The `Store` is the handle a front end opens once per session. It owns the
//! in-memory collection, serves queries from it, and rewrites the library
//! file after every mutation.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let book = Book::new(NewBook::new("Dune", "Frank Herbert").read(true))?;
//! store.add_book(&book)?;
//!
//! let recs = store.recommend();
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::covers::CoverStore;
use crate::library::{self, LibraryStats, SearchField};
use crate::models::Book;
use crate::storage::{to_pretty_json, JsonPersistence};

/// Default file name offered for exports
pub const EXPORT_FILE_NAME: &str = "my_library.json";

/// Handle to the book collection
pub struct Store {
    /// Books in insertion order
    books: Vec<Book>,
    /// Library file handler
    persistence: JsonPersistence,
    /// Cover image directory
    covers: CoverStore,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    ///
    /// A missing library file opens as an empty collection; nothing is
    /// written until the first mutation. Records stored without an id get
    /// one here and the file is rewritten once so the ids stay stable.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::new(config.library_path());
        let mut store = Self {
            books: Vec::new(),
            persistence,
            covers: CoverStore::new(config.covers_dir()),
            config,
        };
        store.load().context("Failed to load library")?;
        info!(
            "Opened library {:?} with {} book(s)",
            store.persistence.path(),
            store.books.len()
        );

        Ok(store)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the library file
    pub fn library_path(&self) -> &Path {
        self.persistence.path()
    }

    // ==================== Queries ====================

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Get a book by ID
    pub fn get_book(&self, id: Uuid) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// First book whose title matches, ignoring case
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        library::position_by_title(&self.books, title).map(|pos| &self.books[pos])
    }

    /// Books whose title or author contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str, field: SearchField) -> Vec<&Book> {
        library::search(&self.books, keyword, field)
    }

    /// Unread books in the genre read most often
    pub fn recommend(&self) -> Vec<&Book> {
        library::recommend(&self.books)
    }

    /// Genre read most often, if any book has been read
    pub fn top_read_genre(&self) -> Option<&str> {
        library::top_read_genre(&self.books)
    }

    /// Read/unread counts
    pub fn stats(&self) -> LibraryStats {
        LibraryStats::compute(&self.books)
    }

    // ==================== Mutations ====================

    /// Append a book and persist
    pub fn add_book(&mut self, book: &Book) -> Result<()> {
        self.books.push(book.clone());
        if let Err(e) = self.save() {
            self.books.pop();
            return Err(e).context("Failed to add book");
        }
        info!("Added book {} ({})", book.title, book.id);
        Ok(())
    }

    /// Remove the first book whose title matches, ignoring case
    ///
    /// Returns the removed book, or `None` if no title matched; nothing is
    /// written in that case.
    pub fn remove_by_title(&mut self, title: &str) -> Result<Option<Book>> {
        match library::position_by_title(&self.books, title) {
            Some(pos) => self.remove_at(pos).map(Some),
            None => {
                warn!("No book titled {:?} to remove", title);
                Ok(None)
            }
        }
    }

    /// Remove a book by ID
    pub fn remove_by_id(&mut self, id: Uuid) -> Result<Option<Book>> {
        match self.books.iter().position(|b| b.id == id) {
            Some(pos) => self.remove_at(pos).map(Some),
            None => {
                warn!("No book with id {} to remove", id);
                Ok(None)
            }
        }
    }

    fn remove_at(&mut self, pos: usize) -> Result<Book> {
        let book = self.books.remove(pos);
        if let Err(e) = self.save() {
            self.books.insert(pos, book);
            return Err(e).context("Failed to remove book");
        }
        info!("Removed book {} ({})", book.title, book.id);
        Ok(book)
    }

    /// Copy a cover image into the covers directory
    ///
    /// Returns the file name to store on the book.
    pub fn import_cover(&self, source: &Path) -> Result<String> {
        self.covers
            .import(source)
            .with_context(|| format!("Failed to import cover {:?}", source))
    }

    // ==================== Persistence ====================

    /// The collection in library file format
    pub fn export_json(&self) -> Result<String> {
        let bytes = to_pretty_json(&self.books).context("Failed to serialize library")?;
        String::from_utf8(bytes).context("Serialized library is not valid UTF-8")
    }

    /// Write the collection to `path` in library file format
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let json = self.export_json()?;
        std::fs::write(path, json).with_context(|| format!("Failed to write export {:?}", path))?;
        info!("Exported {} book(s) to {:?}", self.books.len(), path);
        Ok(())
    }

    /// Discard in-memory state and read the library file again
    pub fn reload(&mut self) -> Result<()> {
        self.load().context("Failed to reload library")
    }

    /// Read the library file, assigning ids to records that lack one
    fn load(&mut self) -> Result<()> {
        self.books = self.persistence.load()?;
        let assigned = library::assign_missing_ids(&mut self.books);
        if assigned > 0 {
            info!("Assigned ids to {} book(s) stored without one", assigned);
            self.save()?;
        }
        Ok(())
    }

    /// Write the full collection to disk
    fn save(&self) -> Result<()> {
        self.persistence
            .save(&self.books)
            .context("Failed to save library")
    }
}
