//! Statistics and recommendation handlers

use anyhow::Result;

use shelf_core::Store;

use crate::output::Output;

/// Show reading statistics
pub fn show(store: &Store, output: &Output) -> Result<()> {
    output.print_stats(&store.stats());
    Ok(())
}

/// Recommend unread books from the most-read genre
pub fn recommend(store: &Store, output: &Output) -> Result<()> {
    let books = store.recommend();
    output.print_recommendations(store.top_read_genre(), &books);
    Ok(())
}

/// List genres that have their own icon
pub fn genres(output: &Output) -> Result<()> {
    output.print_genres();
    Ok(())
}
