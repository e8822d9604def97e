//! File adapters for the flat exchange formats.
//!
//! One loader per source shape. Loads are independent of each other: a
//! failure carries the path and the offending field back to the caller and
//! must never disturb tables loaded from other sources.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ArtistRow, RawAlbumRow};
use crate::normalize::RenameTable;

/// Required headers per source, checked before any row is read so a missing
/// field is reported by name rather than as a row-level decode error.
const ARTIST_COLUMNS: [&str; 1] = ["name"];
const ALBUM_COLUMNS: [&str; 3] = ["title", "artist", "releasedDate"];
const RENAME_COLUMNS: [&str; 2] = ["Original Name", "Cleaned Name"];

/// The rename table is colon-delimited, unlike the comma exports.
const RENAME_DELIMITER: u8 = b':';

/// Errors raised while loading or writing an exchange file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: malformed rows: {source}", .path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("{}: required column `{column}` is missing", .path.display())]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },
}

/// Row shape of the rename-table file.
#[derive(Debug, Deserialize)]
struct RenameRow {
    #[serde(rename = "Original Name")]
    original: String,
    #[serde(rename = "Cleaned Name")]
    cleaned: String,
}

fn open_reader(path: &Path, delimiter: u8) -> Result<csv::Reader<fs::File>, LoadError> {
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn check_columns(
    reader: &mut csv::Reader<fs::File>,
    path: &Path,
    required: &[&'static str],
) -> Result<(), LoadError> {
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

fn collect_rows<T>(reader: &mut csv::Reader<fs::File>, path: &Path) -> Result<Vec<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Load the artist export (comma CSV with a `name` column).
pub fn load_artist_rows(path: &Path) -> Result<Vec<ArtistRow>, LoadError> {
    let mut reader = open_reader(path, b',')?;
    check_columns(&mut reader, path, &ARTIST_COLUMNS)?;
    collect_rows(&mut reader, path)
}

/// Load the album export (comma CSV with `title`, `artist`, `releasedDate`).
pub fn load_album_rows(path: &Path) -> Result<Vec<RawAlbumRow>, LoadError> {
    let mut reader = open_reader(path, b',')?;
    check_columns(&mut reader, path, &ALBUM_COLUMNS)?;
    collect_rows(&mut reader, path)
}

/// Load the artist rename table from its colon-delimited file. A repeated
/// original keeps only its last entry.
pub fn load_rename_table(path: &Path) -> Result<RenameTable, LoadError> {
    let mut reader = open_reader(path, RENAME_DELIMITER)?;
    check_columns(&mut reader, path, &RENAME_COLUMNS)?;
    let rows: Vec<RenameRow> = collect_rows(&mut reader, path)?;
    Ok(RenameTable::from_pairs(
        rows.into_iter().map(|row| (row.original, row.cleaned)),
    ))
}

/// Load the followed-artist list: one name per line, file order preserved,
/// blank lines skipped.
pub fn load_followed_artists(path: &Path) -> Result<Vec<String>, LoadError> {
    read_artist_lines(path)
}

/// Load the exclude list and rewrite the file into its canonical on-disk
/// form: sorted, deduplicated, one name per line.
pub fn load_exclude_list(path: &Path) -> Result<FxHashSet<String>, LoadError> {
    let set: FxHashSet<String> = read_artist_lines(path)?.into_iter().collect();

    let mut sorted: Vec<&str> = set.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    write_artist_lines(path, &sorted)?;

    Ok(set)
}

/// Write artist names one per line. Used for the missing-artist export and
/// the exclude-list rewrite.
pub fn write_artist_lines<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<(), LoadError> {
    let mut text = String::new();
    for name in names {
        text.push_str(name.as_ref());
        text.push('\n');
    }
    fs::write(path, text).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_artist_lines(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

// ============================================================================
// TESTS
// ============================================================================
