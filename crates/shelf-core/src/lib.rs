//! Shelf Core Library
//!
//! This crate provides the core functionality for Shelf, a personal
//! book-tracking tool: record the books you own or have read, search them,
//! see how much you have read, and get recommendations from the genre you
//! read most.
//!
//! # Architecture
//!
//! The whole collection lives in memory and is stored as one JSON file.
//! Every mutation rewrites the file in full.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a book
//! let book = Book::new(NewBook::new("dune", "frank herbert").genre("sci-fi"))?;
//! store.add_book(&book)?;
//!
//! // Query books
//! let found = store.search("herbert", SearchField::Author);
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: Book record and genre icons
//! - `library`: Search, removal, recommendation and statistics
//! - `storage`: Library file persistence
//! - `covers`: Cover image storage
//! - `config`: Application configuration

pub mod config;
pub mod covers;
pub mod library;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use covers::{CoverError, CoverStore};
pub use library::{LibraryStats, SearchField};
pub use models::{genre_icon, Book, KnownGenre, NewBook, ValidationError};
pub use storage::{JsonPersistence, StorageError};
pub use store::{Store, EXPORT_FILE_NAME};
