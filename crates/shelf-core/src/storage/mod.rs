//! Storage layer
//!
//! The library is a single JSON file holding every book in insertion order.
//! It is read in full when the store opens and rewritten in full after
//! every mutation.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{to_pretty_json, JsonPersistence};
