//! Shared normalization for artist names and album titles.
//!
//! Everything downstream matches on exact string equality, so the rename
//! table and the title cleaner are the only places a name or title may be
//! rewritten. Apply them once, at load/normalize time, and compare the
//! results verbatim everywhere else.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::borrow::Cow;

// ============================================================================
// TITLE CLEANING
// ============================================================================

/// Keywords that mark a bracketed group as an edition tag.
pub const EDITION_KEYWORDS: [&str; 5] = ["remaster", "deluxe", "bonus", "mix", "edition"];

/// One bracketed edition tag: either opener paired with either closer, any
/// run of non-bracket characters around a keyword, plus the whitespace
/// before the group. The inner class excludes all four bracket characters,
/// so a group containing a nested group never matches as a whole.
static EDITION_TAG: Lazy<Regex> = Lazy::new(|| {
    let keywords = EDITION_KEYWORDS.join("|");
    Regex::new(&format!(
        r"(?i)\s*[(\[][^()\[\]]*(?:{})[^()\[\]]*[)\]]",
        keywords
    ))
    .unwrap()
});

/// Strip bracketed edition annotations from an album title.
///
/// Removes every `(...)` or `[...]` group whose content contains one of
/// [`EDITION_KEYWORDS`] (case-insensitive, substring), along with the
/// whitespace immediately before the group, then trims the result.
/// Idempotent: cleaning an already-clean title returns it unchanged.
pub fn clean_album_title(title: &str) -> String {
    let mut current = title.to_string();
    // Removing a nested group can splice the surrounding text into a new
    // bracketed group, so run to fixpoint. Titles with nothing to remove
    // exit on the first probe.
    loop {
        match EDITION_TAG.replace_all(&current, "") {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => current = next,
        }
    }
    current.trim().to_string()
}

// ============================================================================
// ARTIST RENAMES
// ============================================================================

/// Exact-match artist rename table built from the mapping file.
///
/// Lookups are case-sensitive and never chained: the mapped value is used
/// as-is even when it has an entry of its own. A name without an entry maps
/// to itself.
#[derive(Clone, Debug, Default)]
pub struct RenameTable {
    entries: FxHashMap<String, String>,
}

impl RenameTable {
    /// Build from (original, cleaned) pairs. A duplicate original overwrites
    /// the earlier entry, so the last occurrence in the file wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Canonical form of an artist name: the mapped value, or the name
    /// itself when no entry exists.
    pub fn apply(&self, name: &str) -> String {
        match self.entries.get(name) {
            Some(cleaned) => cleaned.clone(),
            None => name.to_string(),
        }
    }

    /// Whether an entry exists for this exact spelling.
    pub fn is_mapped(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_edition_tags() {
        assert_eq!(clean_album_title("Abbey Road (Remastered)"), "Abbey Road");
        assert_eq!(clean_album_title("Thriller [Deluxe Edition]"), "Thriller");
        assert_eq!(clean_album_title("Overture (2011 Remaster)"), "Overture");
        assert_eq!(clean_album_title("Greatest Hits (Remixes)"), "Greatest Hits");
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(clean_album_title("Loud [DELUXE]"), "Loud");
        assert_eq!(clean_album_title("Quiet (ReMaStEr)"), "Quiet");
    }

    #[test]
    fn mismatched_bracket_pairs_still_match() {
        assert_eq!(clean_album_title("Night Moves (deluxe]"), "Night Moves");
        assert_eq!(clean_album_title("Day Trip [bonus)"), "Day Trip");
    }

    #[test]
    fn keeps_groups_without_keywords() {
        assert_eq!(clean_album_title("Live [Deluxe] (2020)"), "Live (2020)");
        assert_eq!(clean_album_title("Help! (mono)"), "Help! (mono)");
        assert_eq!(clean_album_title("Plain Title"), "Plain Title");
    }

    #[test]
    fn removes_every_tag_in_one_call() {
        assert_eq!(clean_album_title("X (Remaster) [Bonus Tracks]"), "X");
        assert_eq!(
            clean_album_title("Y (Deluxe) middle [2009 Mix] end"),
            "Y middle end"
        );
    }

    #[test]
    fn nested_groups_do_not_match_as_a_whole() {
        // Only the complete inner group is an edition tag here.
        assert_eq!(
            clean_album_title("Anthology (from (bonus) sessions)"),
            "Anthology (from sessions)"
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_album_title("  Pet Sounds  "), "Pet Sounds");
        assert_eq!(clean_album_title("(Remastered) Alone"), "Alone");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let titles = [
            "Abbey Road (Remastered)",
            "Live [Deluxe] (2020)",
            "Anthology (from (bonus) sessions)",
            "Set (feat. (bonus cut) mix)",
            "Plain Title",
            "",
        ];
        for title in titles {
            let once = clean_album_title(title);
            assert_eq!(clean_album_title(&once), once, "not idempotent: {title:?}");
        }
    }

    #[test]
    fn rename_table_defaults_to_identity() {
        let table = RenameTable::default();
        assert_eq!(table.apply("The Beatles"), "The Beatles");
        assert!(table.is_empty());
    }

    #[test]
    fn rename_table_maps_exact_spellings_only() {
        let table = RenameTable::from_pairs(vec![(
            "The Beatles".to_string(),
            "Beatles".to_string(),
        )]);
        assert_eq!(table.apply("The Beatles"), "Beatles");
        assert_eq!(table.apply("the beatles"), "the beatles");
        assert!(table.is_mapped("The Beatles"));
        assert!(!table.is_mapped("Beatles"));
    }

    #[test]
    fn rename_table_last_duplicate_wins() {
        let table = RenameTable::from_pairs(vec![
            ("Prince".to_string(), "The Artist".to_string()),
            ("Prince".to_string(), "Prince Rogers Nelson".to_string()),
        ]);
        assert_eq!(table.apply("Prince"), "Prince Rogers Nelson");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rename_table_is_not_transitive() {
        let table = RenameTable::from_pairs(vec![
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string()),
        ]);
        assert_eq!(table.apply("A"), "B");
    }
}
