//! Catalog normalization: raw export rows in, canonical tables out.
//!
//! Every artist string, whether it came from the artist export or an album
//! row, goes through the same rename table. Every album title goes through
//! the edition cleaner. A release date that does not parse leaves only that
//! row without a year.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::models::{AlbumRecord, ArtistRow, CleanupReview, RawAlbumRow};
use crate::normalize::{clean_album_title, RenameTable};

/// Date layouts the exports actually contain, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Canonicalize the artist table through the rename table.
pub fn normalize_artists(rows: Vec<ArtistRow>, renames: &RenameTable) -> Vec<ArtistRow> {
    rows.into_iter()
        .map(|row| ArtistRow {
            name: renames.apply(&row.name),
        })
        .collect()
}

/// Normalize one album row. Returns the record plus a review entry when the
/// cleaner changed the title.
pub fn normalize_album_row(
    row: RawAlbumRow,
    renames: &RenameTable,
) -> (AlbumRecord, Option<CleanupReview>) {
    let RawAlbumRow {
        title,
        artist,
        released_date,
    } = row;

    let release_date = parse_release_date(&released_date);
    let cleaned = clean_album_title(&title);
    let review = if cleaned != title {
        Some(CleanupReview {
            original_title: title,
            cleaned_title: cleaned.clone(),
        })
    } else {
        None
    };

    let record = AlbumRecord {
        title: cleaned,
        artist: renames.apply(&artist),
        release_date,
        release_year: release_date.map(|d| d.year()),
    };
    (record, review)
}

/// Normalize the whole album table, collecting review entries in row order.
pub fn normalize_albums(
    rows: Vec<RawAlbumRow>,
    renames: &RenameTable,
) -> (Vec<AlbumRecord>, Vec<CleanupReview>) {
    let mut albums = Vec::with_capacity(rows.len());
    let mut review = Vec::new();
    for row in rows {
        let (record, changed) = normalize_album_row(row, renames);
        if let Some(entry) = changed {
            review.push(entry);
        }
        albums.push(record);
    }
    (albums, review)
}

/// Parse a release-date string, coercing anything unrecognized to `None`.
///
/// Accepts RFC 3339 timestamps, the layouts in `DATE_FORMATS`, and a bare
/// four-digit year (pinned to January 1st).
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = trimmed.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

/// Albums in display order: by artist, then release date, with undated rows
/// after dated ones within the same artist. Ties keep table order.
pub fn album_view(albums: &[AlbumRecord]) -> Vec<&AlbumRecord> {
    let mut view: Vec<&AlbumRecord> = albums.iter().collect();
    view.sort_by(|a, b| {
        a.artist
            .cmp(&b.artist)
            .then_with(|| match (a.release_date, b.release_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
    view
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn renames() -> RenameTable {
        RenameTable::from_pairs(vec![("The Beatles".to_string(), "Beatles".to_string())])
    }

    fn raw(title: &str, artist: &str, date: &str) -> RawAlbumRow {
        RawAlbumRow {
            title: title.to_string(),
            artist: artist.to_string(),
            released_date: date.to_string(),
        }
    }

    #[test]
    fn normalizes_artists_through_rename_table() {
        let rows = vec![
            ArtistRow {
                name: "The Beatles".to_string(),
            },
            ArtistRow {
                name: "Pink Floyd".to_string(),
            },
        ];
        let normalized = normalize_artists(rows, &renames());
        assert_eq!(normalized[0].name, "Beatles");
        assert_eq!(normalized[1].name, "Pink Floyd");
    }

    #[test]
    fn normalizes_album_row_fully() {
        let (record, review) = normalize_album_row(
            raw("Abbey Road (Remastered)", "The Beatles", "1969-09-26"),
            &renames(),
        );
        assert_eq!(record.title, "Abbey Road");
        assert_eq!(record.artist, "Beatles");
        assert_eq!(record.release_year, Some(1969));
        let review = review.unwrap();
        assert_eq!(review.original_title, "Abbey Road (Remastered)");
        assert_eq!(review.cleaned_title, "Abbey Road");
    }

    #[test]
    fn album_artists_and_artist_rows_share_canonical_names() {
        // Same rename table, both inputs land on the same spelling.
        let artists = normalize_artists(
            vec![ArtistRow {
                name: "The Beatles".to_string(),
            }],
            &renames(),
        );
        let (record, _) = normalize_album_row(raw("Help!", "The Beatles", ""), &renames());
        assert_eq!(artists[0].name, record.artist);
    }

    #[test]
    fn unparseable_date_keeps_the_row() {
        let (record, _) = normalize_album_row(raw("Odessey", "Zombies", "someday"), &renames());
        assert_eq!(record.title, "Odessey");
        assert_eq!(record.release_date, None);
        assert_eq!(record.release_year, None);
    }

    #[test]
    fn review_keeps_row_order_and_skips_clean_titles() {
        let rows = vec![
            raw("First (Deluxe)", "A", ""),
            raw("Untouched", "B", ""),
            raw("Second [Remaster]", "C", ""),
        ];
        let (albums, review) = normalize_albums(rows, &RenameTable::default());
        assert_eq!(albums.len(), 3);
        assert_eq!(review.len(), 2);
        assert_eq!(review[0].original_title, "First (Deluxe)");
        assert_eq!(review[1].original_title, "Second [Remaster]");
    }

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(1969, 9, 26);
        assert_eq!(parse_release_date("1969-09-26"), expected);
        assert_eq!(parse_release_date("1969/09/26"), expected);
        assert_eq!(parse_release_date("09/26/1969"), expected);
        assert_eq!(parse_release_date("1969-09-26T00:00:00Z"), expected);
        assert_eq!(parse_release_date(" 1969-09-26 "), expected);
    }

    #[test]
    fn parses_bare_year_as_january_first() {
        assert_eq!(
            parse_release_date("1969"),
            NaiveDate::from_ymd_opt(1969, 1, 1)
        );
    }

    #[test]
    fn rejects_unrecognized_dates() {
        assert_eq!(parse_release_date(""), None);
        assert_eq!(parse_release_date("someday"), None);
        assert_eq!(parse_release_date("69"), None);
        assert_eq!(parse_release_date("1969-13-01"), None);
    }

    #[test]
    fn album_view_sorts_by_artist_then_date_with_undated_last() {
        let (albums, _) = normalize_albums(
            vec![
                raw("Late", "A", "1975-01-01"),
                raw("Undated", "A", ""),
                raw("Early", "A", "1970-01-01"),
                raw("Other", "B", "1960-01-01"),
            ],
            &RenameTable::default(),
        );
        let view = album_view(&albums);
        let titles: Vec<&str> = view.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Early", "Late", "Undated", "Other"]);
    }
}
