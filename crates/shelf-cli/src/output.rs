//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use shelf_core::{Book, KnownGenre, LibraryStats};

/// Width of the reading progress bar
const PROGRESS_WIDTH: usize = 20;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", book.id);
                println!("Title:    {} {}", book.title, book.genre_icon());
                println!("Author:   {}", book.author);
                println!("Year:     {}", book.year);
                println!("Genre:    {}", display_genre(&book.genre));
                println!("Status:   {}", read_status(book.read));
                if let Some(ref cover) = book.cover {
                    println!("Cover:    {}", cover);
                }
                println!("Added:    {}", book.date_added);
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => {
                println!("{}", book.id);
            }
        }
    }

    /// Print a list of books
    pub fn print_books(&self, books: &[&Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for book in books {
                    println!("{}", book_line(book));
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => print_json(books),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print recommendations drawn from `genre`
    pub fn print_recommendations(&self, genre: Option<&str>, books: &[&Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No recommendations yet. Start reading!");
                    return;
                }
                if let Some(genre) = genre {
                    println!("Based on your reading style ({}):", genre);
                    println!();
                }
                for book in books {
                    println!("{}", book_line(book));
                }
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "genre": genre,
                "books": books,
            })),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print library statistics
    pub fn print_stats(&self, stats: &LibraryStats) {
        match self.format {
            OutputFormat::Human => {
                println!("Library Stats");
                println!("=============");
                println!();
                println!("  Total books: {}", stats.total);
                println!("  Books read:  {}", stats.read);
                println!("  Unread:      {}", stats.unread);
                println!(
                    "  Progress:    {} {:.1}% read",
                    progress_bar(stats.percent_read, PROGRESS_WIDTH),
                    stats.percent_read
                );
                if stats.is_established() {
                    println!();
                    println!("{} book(s) read. Keep going!", stats.read);
                }
            }
            OutputFormat::Json => print_json(stats),
            OutputFormat::Quiet => {
                println!("{}/{}", stats.read, stats.total);
            }
        }
    }

    /// Print the genre icon table
    pub fn print_genres(&self) {
        match self.format {
            OutputFormat::Human => {
                for genre in KnownGenre::ALL {
                    println!("{}  {}", genre.icon(), genre.key());
                }
                println!("{}  (anything else)", shelf_core::models::DEFAULT_GENRE_ICON);
            }
            OutputFormat::Json => {
                let genres: Vec<_> = KnownGenre::ALL
                    .iter()
                    .map(|g| serde_json::json!({"genre": g.key(), "icon": g.icon()}))
                    .collect();
                print_json(&genres);
            }
            OutputFormat::Quiet => {
                for genre in KnownGenre::ALL {
                    println!("{}", genre.key());
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON output: {}", e),
    }
}

/// One-line summary used in lists
fn book_line(book: &Book) -> String {
    format!(
        "{} | {} {} | {} | {} | {} | {}",
        &book.id.to_string()[..8],
        truncate(&book.title, 35),
        book.genre_icon(),
        truncate(&book.author, 25),
        book.year,
        display_genre(&book.genre),
        read_status(book.read)
    )
}

fn display_genre(genre: &str) -> &str {
    if genre.is_empty() {
        "(none)"
    } else {
        genre
    }
}

fn read_status(read: bool) -> &'static str {
    if read {
        "read"
    } else {
        "unread"
    }
}

/// Text progress bar for a 0-100 percentage
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Truncate a string to max length (in characters), adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
