//! Console views over the pipeline's outputs.
//!
//! Presentation only: views borrow the canonical tables and print them in a
//! fixed-width layout. Per-view sorting happens on a copy; the tables
//! themselves are never reordered here.

use crate::catalog;
use crate::models::{AlbumRecord, CleanupReview, Reconciliation, RosterEntry};

/// The full roster with album counts, canonical order.
pub fn print_roster(roster: &[RosterEntry]) {
    println!("\nAll artists ({}):", roster.len());
    println!("{:-<80}", "");
    println!("{:<56} {:>12}", "Artist", "Album Count");
    for entry in roster {
        println!("{:<56} {:>12}", entry.artist, entry.album_count);
    }
}

/// Artists at or above the album-count threshold, most prolific first.
pub fn print_top(top: &[RosterEntry], min_albums: usize) {
    if top.is_empty() {
        println!("\nNo artists with at least {} albums.", min_albums);
        return;
    }
    println!(
        "\nArtists with at least {} albums ({}):",
        min_albums,
        top.len()
    );
    println!("{:-<80}", "");
    for entry in top {
        println!("{:<56} {:>12}", entry.artist, entry.album_count);
    }
}

/// The normalized album table, sorted by artist and release date.
pub fn print_albums(albums: &[AlbumRecord]) {
    println!("\nAlbums ({}):", albums.len());
    println!("{:-<80}", "");
    println!("{:<32} {:<40} {:>6}", "Artist", "Album Title", "Year");
    for album in catalog::album_view(albums) {
        let year = album
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<32} {:<40} {:>6}", album.artist, album.title, year);
    }
}

/// Every title the cleaner changed, in normalization order.
pub fn print_review(review: &[CleanupReview]) {
    if review.is_empty() {
        println!("\nNo album titles needed cleaning.");
        return;
    }
    println!("\nCleaned album titles ({}):", review.len());
    println!("{:-<80}", "");
    for entry in review {
        println!("{:<40} -> {}", entry.original_title, entry.cleaned_title);
    }
}

/// Both directions of the roster/followed comparison.
pub fn print_reconciliation(result: &Reconciliation) {
    print_name_section(
        "In library, not followed",
        &result.missing_from_followed,
    );
    print_name_section(
        "Followed, not in library",
        &result.missing_from_library,
    );
}

fn print_name_section(title: &str, names: &[String]) {
    println!("\n{} ({}):", title, names.len());
    println!("{:-<80}", "");
    if names.is_empty() {
        println!("(none)");
    }
    for name in names {
        println!("{}", name);
    }
}

/// A sorted name list (used for the exclude and followed views).
pub fn print_sorted_names<'a, I>(title: &str, names: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sorted: Vec<&str> = names.into_iter().collect();
    sorted.sort_unstable();
    println!("\n{} ({}):", title, sorted.len());
    println!("{:-<80}", "");
    for name in sorted {
        println!("{}", name);
    }
}
