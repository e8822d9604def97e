//! Roster aggregation: the union of both tables, with album counts.

use rustc_hash::FxHashMap;

use crate::models::{AlbumRecord, ArtistRow, RosterEntry};

/// Merge the artist table with per-artist album counts into the roster.
///
/// Every artist appearing in either table gets exactly one entry; artists
/// only present on albums are included, artists without albums count zero.
/// Entries come back sorted ascending by name. Returns `None` when both
/// tables are empty, which callers report as "no data" rather than treat as
/// a failure.
pub fn aggregate(artists: &[ArtistRow], albums: &[AlbumRecord]) -> Option<Vec<RosterEntry>> {
    if artists.is_empty() && albums.is_empty() {
        return None;
    }

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for album in albums {
        *counts.entry(album.artist.as_str()).or_insert(0) += 1;
    }

    let mut universe: Vec<&str> = artists.iter().map(|row| row.name.as_str()).collect();
    universe.extend(counts.keys().copied());
    universe.sort_unstable();
    universe.dedup();

    let roster = universe
        .into_iter()
        .map(|artist| RosterEntry {
            artist: artist.to_string(),
            album_count: counts.get(artist).copied().unwrap_or(0),
        })
        .collect();
    Some(roster)
}

/// Artists holding at least `min_albums` albums, most prolific first.
/// The sort is stable, so equal counts keep the roster's ascending name
/// order.
pub fn top_artists(roster: &[RosterEntry], min_albums: usize) -> Vec<RosterEntry> {
    let mut top: Vec<RosterEntry> = roster
        .iter()
        .filter(|entry| entry.album_count >= min_albums)
        .cloned()
        .collect();
    top.sort_by(|a, b| b.album_count.cmp(&a.album_count));
    top
}

// ============================================================================
// TESTS
// ============================================================================
