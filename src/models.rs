//! Core data models for the roster audit.
//!
//! Raw rows mirror the exchange-file column layouts exactly; normalized
//! records are what the downstream stages operate on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Raw Rows (exchange-file shapes)
// ============================================================================

/// One row of the artist export. The source file carries a single `name`
/// column; anything else in the file is ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ArtistRow {
    pub name: String,
}

/// One row of the album export, field names exactly as the service writes
/// them (`releasedDate` is camelCase in the source file).
#[derive(Clone, Debug, Deserialize)]
pub struct RawAlbumRow {
    pub title: String,
    pub artist: String,
    #[serde(rename = "releasedDate")]
    pub released_date: String,
}

// ============================================================================
// Normalized Records
// ============================================================================

/// A fully normalized album: cleaned title, canonical artist, parsed date.
/// `release_year` is derived from `release_date` and absent whenever the
/// date did not parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumRecord {
    pub title: String,
    pub artist: String,
    pub release_date: Option<NaiveDate>,
    pub release_year: Option<i32>,
}

/// Audit-trail entry for one title the cleaner changed. Entries keep the
/// album table's row order at normalization time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanupReview {
    pub original_title: String,
    pub cleaned_title: String,
}

// ============================================================================
// Roster and Reconciliation
// ============================================================================

/// One artist in the aggregated roster, with the number of albums the
/// library holds for them. Zero is a valid count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub artist: String,
    pub album_count: usize,
}

/// Result of reconciling the roster against the followed-artist list.
///
/// `missing_from_followed` has the exclude set subtracted.
/// `missing_from_library` does not: an excluded artist you follow but do
/// not own still shows up here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub missing_from_followed: Vec<String>,
    pub missing_from_library: Vec<String>,
}

// ============================================================================
// Run Summary (instrumentation)
// ============================================================================

/// Per-phase counters for one audit run. Logged to stderr in quiet mode and
/// written to a JSON file on request.
#[derive(Default, Debug, Clone, Serialize)]
pub struct RunSummary {
    // Load phase
    pub artists_loaded: usize,
    pub albums_loaded: usize,
    pub rename_entries: usize,
    pub followed_count: usize,
    pub excluded_count: usize,

    // Normalize phase
    pub renames_applied: usize,
    pub titles_cleaned: usize,
    pub dates_unparsed: usize,

    // Aggregate + reconcile
    pub roster_size: usize,
    pub missing_from_followed: usize,
    pub missing_from_library: usize,

    // Timing
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// Log the summary to stderr in JSON format.
    pub fn log(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[SUMMARY]\n{}", json);
        }
    }

    /// Write the summary to a JSON file.
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
