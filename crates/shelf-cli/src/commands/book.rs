//! Book command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use shelf_core::{Book, NewBook, SearchField, Store};

use crate::output::Output;
use crate::prompt::confirm;

/// Which books `list` shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFilter {
    All,
    Read,
    Unread,
}

impl ReadFilter {
    pub fn from_flags(read: bool, unread: bool) -> Self {
        match (read, unread) {
            (true, false) => ReadFilter::Read,
            (false, true) => ReadFilter::Unread,
            _ => ReadFilter::All,
        }
    }

    fn matches(&self, book: &Book) -> bool {
        match self {
            ReadFilter::All => true,
            ReadFilter::Read => book.read,
            ReadFilter::Unread => !book.read,
        }
    }
}

/// Add a new book, optionally importing a cover image
pub fn add(
    store: &mut Store,
    input: NewBook,
    cover: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut book = Book::new(input).context("Invalid book")?;

    if let Some(path) = cover {
        book.cover = Some(store.import_cover(&path)?);
    }

    store.add_book(&book).context("Failed to add book")?;

    output.success(&format!("Book '{}' added!", book.title));
    output.print_book(&book);

    Ok(())
}

/// List books, optionally only read or unread ones
pub fn list(store: &Store, filter: ReadFilter, output: &Output) -> Result<()> {
    let books: Vec<&Book> = store.books().iter().filter(|b| filter.matches(b)).collect();
    output.print_books(&books);
    Ok(())
}

/// Show a single book
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let uuid = parse_book_id(&id, store)?;

    let book = store
        .get_book(uuid)
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", id))?;

    output.print_book(book);
    Ok(())
}

/// Search books by title or author
pub fn search(store: &Store, keyword: String, field: SearchField, output: &Output) -> Result<()> {
    if keyword.trim().is_empty() {
        bail!("Search keyword cannot be empty");
    }

    let books = store.search(&keyword, field);
    output.print_books(&books);
    Ok(())
}

/// Remove a book by title (first match) or by ID
pub fn remove(
    store: &mut Store,
    title: Option<String>,
    id: Option<String>,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let (target, label) = match (id, title) {
        (Some(id), _) => {
            let uuid = parse_book_id(&id, store)?;
            let book = store
                .get_book(uuid)
                .ok_or_else(|| anyhow::anyhow!("Book not found: {}", id))?;
            (book.id, book.title.clone())
        }
        (None, Some(title)) => {
            let book = store
                .find_by_title(&title)
                .ok_or_else(|| anyhow::anyhow!("Book not found: {}", title))?;
            (book.id, book.title.clone())
        }
        (None, None) => bail!("Give a title or --id to remove"),
    };

    if output.should_prompt() && !yes {
        println!("Remove book: {} - {}", &target.to_string()[..8], label);
        if !confirm("Are you sure?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    let removed = store
        .remove_by_id(target)
        .context("Failed to remove book")?
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", label))?;

    output.success(&format!("Removed book: {}", removed.title));

    Ok(())
}

/// Export the library, to a file or stdout
pub fn export(store: &Store, path: Option<PathBuf>, output: &Output) -> Result<()> {
    match path {
        Some(path) => {
            store.export_to(&path)?;
            output.success(&format!(
                "Exported {} book(s) to {}",
                store.books().len(),
                path.display()
            ));
        }
        None => {
            println!("{}", store.export_json()?);
        }
    }
    Ok(())
}

/// Parse a book ID (supports full UUID or prefix)
fn parse_book_id(id: &str, store: &Store) -> Result<Uuid> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Book ID cannot be empty");
    }

    // Try full UUID first
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let matches: Vec<_> = store
        .books()
        .iter()
        .filter(|b| b.id.to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No book found matching: {}", id),
        1 => Ok(matches[0].id),
        _ => {
            eprintln!("Multiple books match '{}':", id);
            for book in &matches {
                eprintln!("  {} - {}", book.id, book.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
