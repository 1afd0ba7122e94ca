//! Data models for Shelf
//!
//! Defines the book record, the input used to create one, and the closed
//! genre table used for display icons.

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Latest accepted publication year
pub const MAX_YEAR: u16 = 2100;
/// Year used when none is given
pub const DEFAULT_YEAR: u16 = 2024;

/// Icon shown for genres outside the known table
pub const DEFAULT_GENRE_ICON: &str = "📚";

/// Format of `date_added` timestamps; the fraction is always six digits
const DATE_ADDED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Reasons a new book is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Author is required")]
    MissingAuthor,

    #[error("Year {0} is out of range (0-2100)")]
    YearOutOfRange(u32),
}

/// A book in the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier
    ///
    /// Nil when loaded from a file written before identifiers existed;
    /// `Store` replaces those with fresh ids and saves once.
    #[serde(default)]
    pub id: Uuid,
    /// Title, title-cased
    pub title: String,
    /// Author, title-cased
    pub author: String,
    /// Publication year
    pub year: u16,
    /// Free-text genre, title-cased
    pub genre: String,
    /// Whether the book has been finished
    pub read: bool,
    /// When the book was added; never modified
    pub date_added: String,
    /// File name of the cover image in the covers directory
    #[serde(default)]
    pub cover: Option<String>,
}

/// Raw input for a new book, before normalization
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: Option<u32>,
    pub genre: String,
    pub read: bool,
    pub cover: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn cover(mut self, cover: Option<String>) -> Self {
        self.cover = cover;
        self
    }
}

impl Book {
    /// Create a book from raw input
    ///
    /// Title, author and genre are title-cased. Title and author must be
    /// non-empty after trimming and the year must fall in 0-2100.
    pub fn new(input: NewBook) -> Result<Self, ValidationError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let author = input.author.trim();
        if author.is_empty() {
            return Err(ValidationError::MissingAuthor);
        }

        let year = input.year.unwrap_or(u32::from(DEFAULT_YEAR));
        if year > u32::from(MAX_YEAR) {
            return Err(ValidationError::YearOutOfRange(year));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title: title_case(title),
            author: title_case(author),
            year: year as u16,
            genre: title_case(input.genre.trim()),
            read: input.read,
            date_added: Local::now().format(DATE_ADDED_FORMAT).to_string(),
            cover: input.cover,
        })
    }

    /// Display icon for this book's genre
    pub fn genre_icon(&self) -> &'static str {
        genre_icon(&self.genre)
    }
}

/// Genres with a dedicated display icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownGenre {
    Romance,
    Horror,
    Fantasy,
    SciFi,
    Fiction,
    NonFiction,
    Mystery,
    History,
    Poetry,
}

impl KnownGenre {
    pub const ALL: [KnownGenre; 9] = [
        KnownGenre::Romance,
        KnownGenre::Horror,
        KnownGenre::Fantasy,
        KnownGenre::SciFi,
        KnownGenre::Fiction,
        KnownGenre::NonFiction,
        KnownGenre::Mystery,
        KnownGenre::History,
        KnownGenre::Poetry,
    ];

    /// Look up a genre label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "romance" => Some(KnownGenre::Romance),
            "horror" => Some(KnownGenre::Horror),
            "fantasy" => Some(KnownGenre::Fantasy),
            "sci-fi" => Some(KnownGenre::SciFi),
            "fiction" => Some(KnownGenre::Fiction),
            "non-fiction" => Some(KnownGenre::NonFiction),
            "mystery" => Some(KnownGenre::Mystery),
            "history" => Some(KnownGenre::History),
            "poetry" => Some(KnownGenre::Poetry),
            _ => None,
        }
    }

    /// Lower-case key matched by `from_label`
    pub fn key(&self) -> &'static str {
        match self {
            KnownGenre::Romance => "romance",
            KnownGenre::Horror => "horror",
            KnownGenre::Fantasy => "fantasy",
            KnownGenre::SciFi => "sci-fi",
            KnownGenre::Fiction => "fiction",
            KnownGenre::NonFiction => "non-fiction",
            KnownGenre::Mystery => "mystery",
            KnownGenre::History => "history",
            KnownGenre::Poetry => "poetry",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            KnownGenre::Romance => "❤️",
            KnownGenre::Horror => "👻",
            KnownGenre::Fantasy => "🐉",
            KnownGenre::SciFi => "🚀",
            KnownGenre::Fiction => "📘",
            KnownGenre::NonFiction => "📖",
            KnownGenre::Mystery => "🕵️",
            KnownGenre::History => "🏺",
            KnownGenre::Poetry => "📝",
        }
    }
}

/// Icon for a genre label, falling back to `DEFAULT_GENRE_ICON`
pub fn genre_icon(label: &str) -> &'static str {
    KnownGenre::from_label(label)
        .map(|g| g.icon())
        .unwrap_or(DEFAULT_GENRE_ICON)
}

/// Title-case a string
///
/// A letter is upper-cased when it follows a non-letter (or starts the
/// string) and lower-cased otherwise, so "sci-fi" becomes "Sci-Fi".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new_normalizes_case() {
        let book = Book::new(
            NewBook::new("the left hand of darkness", "ursula k. le guin").genre("sci-fi"),
        )
        .unwrap();
        assert_eq!(book.title, "The Left Hand Of Darkness");
        assert_eq!(book.author, "Ursula K. Le Guin");
        assert_eq!(book.genre, "Sci-Fi");
        assert_eq!(book.year, DEFAULT_YEAR);
        assert!(!book.read);
        assert!(book.cover.is_none());
    }

    #[test]
    fn test_book_new_trims_input() {
        let book = Book::new(NewBook::new("  dune ", " frank herbert  ")).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
    }

    #[test]
    fn test_book_new_requires_title_and_author() {
        assert_eq!(
            Book::new(NewBook::new("", "Someone")),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            Book::new(NewBook::new("Something", "   ")),
            Err(ValidationError::MissingAuthor)
        );
    }

    #[test]
    fn test_book_new_year_range() {
        assert!(Book::new(NewBook::new("A", "B").year(0)).is_ok());
        assert!(Book::new(NewBook::new("A", "B").year(2100)).is_ok());
        assert_eq!(
            Book::new(NewBook::new("A", "B").year(2101)),
            Err(ValidationError::YearOutOfRange(2101))
        );
    }

    #[test]
    fn test_book_new_assigns_unique_ids() {
        let a = Book::new(NewBook::new("Dune", "Frank Herbert")).unwrap();
        let b = Book::new(NewBook::new("Dune", "Frank Herbert")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_date_added_format() {
        let book = Book::new(NewBook::new("Dune", "Frank Herbert")).unwrap();
        assert!(
            chrono::NaiveDateTime::parse_from_str(&book.date_added, "%Y-%m-%d %H:%M:%S%.f").is_ok(),
            "unexpected date_added: {}",
            book.date_added
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("HELLO WORLD"), "Hello World");
        assert_eq!(title_case("non-fiction"), "Non-Fiction");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("1984"), "1984");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_genre_icon_lookup() {
        assert_eq!(genre_icon("Sci-Fi"), "🚀");
        assert_eq!(genre_icon("horror"), "👻");
        assert_eq!(genre_icon("  POETRY "), "📝");
        assert_eq!(genre_icon("Cookbook"), DEFAULT_GENRE_ICON);
        assert_eq!(genre_icon(""), DEFAULT_GENRE_ICON);
    }

    #[test]
    fn test_known_genre_keys_round_trip() {
        for genre in KnownGenre::ALL {
            assert_eq!(KnownGenre::from_label(genre.key()), Some(genre));
        }
    }

    #[test]
    fn test_book_deserializes_without_id_or_cover() {
        let json = r#"{
            "title": "Dune",
            "author": "Frank Herbert",
            "year": 1965,
            "genre": "Sci-Fi",
            "read": true,
            "date_added": "2024-05-01 10:00:00.000000"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.year, 1965);
        assert!(book.cover.is_none());
        assert!(book.id.is_nil());
    }
}
