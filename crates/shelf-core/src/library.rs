//! Collection operations
//!
//! Pure functions over an in-memory slice of books: search, title lookup,
//! recommendations and statistics. Nothing here touches the filesystem;
//! `Store` wraps these and persists after mutations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Book;

/// Field a keyword search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "title"),
            SearchField::Author => write!(f, "author"),
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            other => Err(format!(
                "Unknown search field '{}'. Use 'title' or 'author'.",
                other
            )),
        }
    }
}

impl SearchField {
    fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
        }
    }
}

/// Books whose `field` contains `keyword`, ignoring case, in collection order
///
/// An empty keyword matches every book.
pub fn search<'a>(books: &'a [Book], keyword: &str, field: SearchField) -> Vec<&'a Book> {
    let keyword = keyword.to_lowercase();
    books
        .iter()
        .filter(|b| field.value(b).to_lowercase().contains(&keyword))
        .collect()
}

/// Index of the first book whose title equals `title`, ignoring case
pub fn position_by_title(books: &[Book], title: &str) -> Option<usize> {
    let title = title.to_lowercase();
    books.iter().position(|b| b.title.to_lowercase() == title)
}

/// Remove the first book whose title equals `title`, ignoring case
///
/// Later duplicates are left in place.
pub fn remove_by_title(books: &mut Vec<Book>, title: &str) -> Option<Book> {
    position_by_title(books, title).map(|pos| books.remove(pos))
}

/// Give every book with a nil id a fresh one
///
/// Returns how many ids were assigned.
pub fn assign_missing_ids(books: &mut [Book]) -> usize {
    let mut assigned = 0;
    for book in books.iter_mut().filter(|b| b.id.is_nil()) {
        book.id = Uuid::new_v4();
        assigned += 1;
    }
    assigned
}

/// Genre read most often, or `None` if nothing has been read
///
/// Ties go to the genre whose first read book appears earliest.
pub fn top_read_genre(books: &[Book]) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for book in books.iter().filter(|b| b.read) {
        match counts.iter().position(|(genre, _)| *genre == book.genre) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((book.genre.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (genre, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((genre, count));
        }
    }
    best.map(|(genre, _)| genre)
}

/// Unread books in the most-read genre, in collection order
pub fn recommend(books: &[Book]) -> Vec<&Book> {
    let Some(genre) = top_read_genre(books) else {
        return Vec::new();
    };
    books
        .iter()
        .filter(|b| !b.read && b.genre == genre)
        .collect()
}

/// Collection size needed before the encouragement line is shown
const ESTABLISHED_LIBRARY_SIZE: usize = 3;

/// Aggregate counts over a collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    /// Share of books read, 0-100
    pub percent_read: f64,
}

impl LibraryStats {
    pub fn compute(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|b| b.read).count();
        let percent_read = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };
        Self {
            total,
            read,
            unread: total - read,
            percent_read,
        }
    }

    /// Whether the collection is large enough to show reading encouragement
    pub fn is_established(&self) -> bool {
        self.total >= ESTABLISHED_LIBRARY_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;

    fn book(title: &str, author: &str, genre: &str, read: bool) -> Book {
        Book::new(NewBook::new(title, author).genre(genre).read(read)).unwrap()
    }

    fn sample() -> Vec<Book> {
        vec![
            book("Dune", "Frank Herbert", "Sci-Fi", true),
            book("Neuromancer", "William Gibson", "Sci-Fi", false),
            book("It", "Stephen King", "Horror", true),
        ]
    }

    fn titles(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn test_search_by_author() {
        let books = sample();
        let results = search(&books, "king", SearchField::Author);
        assert_eq!(titles(&results), vec!["It"]);
    }

    #[test]
    fn test_search_by_title_is_case_insensitive() {
        let books = sample();
        let results = search(&books, "NEURO", SearchField::Title);
        assert_eq!(titles(&results), vec!["Neuromancer"]);
    }

    #[test]
    fn test_search_partitions_collection() {
        let books = sample();
        for keyword in ["e", "an", "zz", "DUNE", "i"] {
            for field in [SearchField::Title, SearchField::Author] {
                let results = search(&books, keyword, field);
                let needle = keyword.to_lowercase();
                for b in &books {
                    let matches = field.value(b).to_lowercase().contains(&needle);
                    let included = results.iter().any(|r| r.id == b.id);
                    assert_eq!(matches, included, "{} in {} of {}", keyword, field, b.title);
                }
            }
        }
    }

    #[test]
    fn test_search_preserves_order() {
        let books = sample();
        let results = search(&books, "n", SearchField::Title);
        assert_eq!(titles(&results), vec!["Dune", "Neuromancer"]);
    }

    #[test]
    fn test_search_empty_keyword_matches_all() {
        let books = sample();
        assert_eq!(search(&books, "", SearchField::Title).len(), 3);
    }

    #[test]
    fn test_remove_by_title() {
        let mut books = sample();
        let removed = remove_by_title(&mut books, "dune").unwrap();
        assert_eq!(removed.title, "Dune");
        let remaining: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(remaining, vec!["Neuromancer", "It"]);
    }

    #[test]
    fn test_remove_by_title_first_duplicate_only() {
        let mut books = sample();
        let mut second = book("Dune", "Someone Else", "Sci-Fi", false);
        second.year = 1999;
        books.push(second);

        let removed = remove_by_title(&mut books, "DUNE").unwrap();
        assert_eq!(removed.author, "Frank Herbert");
        assert_eq!(books.len(), 3);
        assert_eq!(books[2].title, "Dune");
        assert_eq!(books[2].year, 1999);
    }

    #[test]
    fn test_remove_by_title_missing() {
        let mut books = sample();
        assert!(remove_by_title(&mut books, "Foundation").is_none());
        assert_eq!(books.len(), 3);
    }

    #[test]
    fn test_remove_requires_whole_title() {
        let mut books = sample();
        assert!(remove_by_title(&mut books, "Neuro").is_none());
    }

    #[test]
    fn test_assign_missing_ids() {
        let mut books = sample();
        let kept = books[1].id;
        books[0].id = Uuid::nil();
        books[2].id = Uuid::nil();

        assert_eq!(assign_missing_ids(&mut books), 2);
        assert!(books.iter().all(|b| !b.id.is_nil()));
        assert_ne!(books[0].id, books[2].id);
        assert_eq!(books[1].id, kept);
        assert_eq!(assign_missing_ids(&mut books), 0);
    }

    #[test]
    fn test_recommend_scenario() {
        let books = sample();
        let recs = recommend(&books);
        assert_eq!(titles(&recs), vec!["Neuromancer"]);
    }

    #[test]
    fn test_recommend_nothing_read() {
        let books = vec![
            book("Dune", "Frank Herbert", "Sci-Fi", false),
            book("It", "Stephen King", "Horror", false),
        ];
        assert!(recommend(&books).is_empty());
        assert!(top_read_genre(&books).is_none());
    }

    #[test]
    fn test_recommend_empty_collection() {
        assert!(recommend(&[]).is_empty());
    }

    #[test]
    fn test_recommend_picks_most_read_genre() {
        let books = vec![
            book("It", "Stephen King", "Horror", true),
            book("Dune", "Frank Herbert", "Sci-Fi", true),
            book("Hyperion", "Dan Simmons", "Sci-Fi", true),
            book("Carrie", "Stephen King", "Horror", false),
            book("Foundation", "Isaac Asimov", "Sci-Fi", false),
            book("Solaris", "Stanislaw Lem", "Sci-Fi", false),
        ];
        assert_eq!(top_read_genre(&books), Some("Sci-Fi"));
        assert_eq!(titles(&recommend(&books)), vec!["Foundation", "Solaris"]);
    }

    #[test]
    fn test_recommend_tie_goes_to_first_encountered() {
        let books = vec![
            book("Carrie", "Stephen King", "Horror", false),
            book("It", "Stephen King", "Horror", true),
            book("Dune", "Frank Herbert", "Sci-Fi", true),
            book("Neuromancer", "William Gibson", "Sci-Fi", false),
        ];
        assert_eq!(top_read_genre(&books), Some("Horror"));
        assert_eq!(titles(&recommend(&books)), vec!["Carrie"]);
    }

    #[test]
    fn test_recommend_never_includes_read_books() {
        let books = vec![
            book("Dune", "Frank Herbert", "Sci-Fi", true),
            book("Hyperion", "Dan Simmons", "Sci-Fi", true),
        ];
        assert!(recommend(&books).iter().all(|b| !b.read));
        assert!(recommend(&books).is_empty());
    }

    #[test]
    fn test_search_field_from_str() {
        assert_eq!("title".parse::<SearchField>(), Ok(SearchField::Title));
        assert_eq!("Author".parse::<SearchField>(), Ok(SearchField::Author));
        assert!("genre".parse::<SearchField>().is_err());
        assert_eq!(SearchField::Author.to_string(), "author");
    }

    #[test]
    fn test_stats() {
        let stats = LibraryStats::compute(&sample());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.read, 2);
        assert_eq!(stats.unread, 1);
        assert!((stats.percent_read - 66.666).abs() < 0.01);
        assert!(stats.is_established());
    }

    #[test]
    fn test_stats_empty() {
        let stats = LibraryStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent_read, 0.0);
        assert!(!stats.is_established());
    }
}
