//! Shelf CLI
//!
//! Command-line interface for Shelf - personal book collection tracking.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use shelf_core::{Config, NewBook, SearchField, StorageError, Store};

mod commands;
mod logging;
mod output;
mod prompt;

use commands::book::ReadFilter;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf - Personal book collection tracker")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book
    Add {
        /// Book title
        title: String,
        /// Book author
        author: String,
        /// Publication year (0-2100)
        #[arg(short, long)]
        year: Option<u32>,
        /// Genre
        #[arg(short, long, default_value = "")]
        genre: String,
        /// Mark as already read
        #[arg(short, long)]
        read: bool,
        /// Cover image to import (.jpg or .png)
        #[arg(long, value_name = "IMAGE")]
        cover: Option<PathBuf>,
    },
    /// List all books
    #[command(alias = "ls")]
    List {
        /// Only books already read
        #[arg(long, conflicts_with = "unread")]
        read: bool,
        /// Only books not yet read
        #[arg(long)]
        unread: bool,
    },
    /// Show book details
    Show {
        /// Book ID (full UUID or prefix)
        id: String,
    },
    /// Search books by title or author
    Search {
        /// Text to look for (case-insensitive)
        keyword: String,
        /// Field to search: title or author
        #[arg(short, long, default_value_t = SearchField::Title)]
        by: SearchField,
    },
    /// Remove a book (first title match, or by ID)
    #[command(alias = "rm")]
    Remove {
        /// Title of the book to remove (case-insensitive)
        #[arg(required_unless_present = "id")]
        title: Option<String>,
        /// Remove by ID instead (full UUID or prefix)
        #[arg(long, conflicts_with = "title")]
        id: Option<String>,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show reading statistics
    Stats,
    /// Recommend unread books from your most-read genre
    Recommend,
    /// Export the library as JSON
    Export {
        /// Output file (prints to stdout if omitted)
        path: Option<PathBuf>,
    },
    /// List genres with their icons
    Genres,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the store
    match &cli.command {
        Commands::Config { command } => {
            return handle_config_command(command.clone(), cli.config.as_ref(), &output);
        }
        Commands::Genres => return commands::stats::genres(&output),
        _ => {}
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    let mut store = match Store::open_with_config(config) {
        Ok(store) => store,
        Err(e) => {
            print_recovery_hint(&e);
            return Err(e);
        }
    };

    let result = run(cli.command, &mut store, &output);
    if let Err(ref e) = result {
        print_recovery_hint(e);
    }
    result
}

fn run(command: Commands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
            cover,
        } => {
            let mut input = NewBook::new(title, author).genre(genre).read(read);
            input.year = year;
            commands::book::add(store, input, cover, output)
        }
        Commands::List { read, unread } => {
            commands::book::list(store, ReadFilter::from_flags(read, unread), output)
        }
        Commands::Show { id } => commands::book::show(store, id, output),
        Commands::Search { keyword, by } => commands::book::search(store, keyword, by, output),
        Commands::Remove { title, id, yes } => {
            commands::book::remove(store, title, id, yes, output)
        }
        Commands::Stats => commands::stats::show(store, output),
        Commands::Recommend => commands::stats::recommend(store, output),
        Commands::Export { path } => commands::book::export(store, path, output),
        Commands::Genres | Commands::Config { .. } => unreachable!(), // Handled in main
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print a recovery suggestion for storage errors
fn print_recovery_hint(error: &anyhow::Error) {
    if let Some(suggestion) = recovery_hint(error) {
        eprintln!("hint: {}", suggestion);
    }
}

/// Suggestion for the first recoverable storage error in the chain
fn recovery_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|e| e.downcast_ref::<StorageError>())
        .filter(|e| e.is_recoverable())
        .and_then(|e| e.recovery_suggestion())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "shelf", "add", "dune", "frank herbert", "--year", "1965", "--genre", "sci-fi",
            "--read",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title,
                author,
                year,
                genre,
                read,
                cover,
            } => {
                assert_eq!(title, "dune");
                assert_eq!(author, "frank herbert");
                assert_eq!(year, Some(1965));
                assert_eq!(genre, "sci-fi");
                assert!(read);
                assert!(cover.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_search_field() {
        let cli = Cli::try_parse_from(["shelf", "search", "king", "--by", "author"]).unwrap();
        match cli.command {
            Commands::Search { keyword, by } => {
                assert_eq!(keyword, "king");
                assert_eq!(by, SearchField::Author);
            }
            _ => panic!("expected search"),
        }

        let cli = Cli::try_parse_from(["shelf", "search", "dune"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Search {
                by: SearchField::Title,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["shelf", "search", "x", "--by", "genre"]).is_err());
    }

    #[test]
    fn test_parse_remove() {
        let cli = Cli::try_parse_from(["shelf", "rm", "The Hobbit", "-y"]).unwrap();
        match cli.command {
            Commands::Remove { title, id, yes } => {
                assert_eq!(title.as_deref(), Some("The Hobbit"));
                assert!(id.is_none());
                assert!(yes);
            }
            _ => panic!("expected remove"),
        }

        assert!(Cli::try_parse_from(["shelf", "remove", "--id", "1234abcd"]).is_ok());
        assert!(Cli::try_parse_from(["shelf", "remove"]).is_err());
        assert!(Cli::try_parse_from(["shelf", "remove", "Dune", "--id", "1234"]).is_err());
    }

    #[test]
    fn test_parse_list_filters_conflict() {
        assert!(Cli::try_parse_from(["shelf", "list", "--read"]).is_ok());
        assert!(Cli::try_parse_from(["shelf", "ls", "--unread"]).is_ok());
        assert!(Cli::try_parse_from(["shelf", "list", "--read", "--unread"]).is_err());
    }

    #[test]
    fn test_recovery_hint() {
        let corrupt = anyhow::Error::new(StorageError::CorruptStore {
            path: PathBuf::from("library.json"),
            details: "expected value".to_string(),
        })
        .context("Failed to load library");
        assert!(recovery_hint(&corrupt).unwrap().contains("left untouched"));

        let not_found = anyhow::Error::new(StorageError::NotFound {
            path: PathBuf::from("x"),
        });
        assert!(recovery_hint(&not_found).is_none());

        assert!(recovery_hint(&anyhow::anyhow!("No book found")).is_none());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["shelf", "stats", "--json", "--config", "/tmp/c.toml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
