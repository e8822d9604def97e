//! Three-way reconciliation of the roster, the followed-artist list, and
//! the exclude set.

use rustc_hash::FxHashSet;

use crate::models::{Reconciliation, RosterEntry};

/// Compare the aggregated roster against the followed-artist list.
///
/// `missing_from_followed` is library minus followed minus excluded: the
/// artists you own but neither follow nor opted out of. The exclusion is
/// one-directional; `missing_from_library` is followed minus library with
/// nothing subtracted, so an excluded artist you follow but do not own is
/// still reported. Both lists come back sorted ascending. Returns `None`
/// when the roster is empty: there is nothing to compare, which callers
/// report instead of treating as a failure.
pub fn reconcile(
    roster: &[RosterEntry],
    followed: &[String],
    excluded: &FxHashSet<String>,
) -> Option<Reconciliation> {
    if roster.is_empty() {
        return None;
    }

    let library: FxHashSet<&str> = roster.iter().map(|e| e.artist.as_str()).collect();
    let followed_set: FxHashSet<&str> = followed.iter().map(String::as_str).collect();

    let mut missing_from_followed: Vec<String> = library
        .iter()
        .copied()
        .filter(|name| !followed_set.contains(name) && !excluded.contains(*name))
        .map(String::from)
        .collect();
    missing_from_followed.sort_unstable();

    let mut missing_from_library: Vec<String> = followed_set
        .iter()
        .copied()
        .filter(|name| !library.contains(name))
        .map(String::from)
        .collect();
    missing_from_library.sort_unstable();

    Some(Reconciliation {
        missing_from_followed,
        missing_from_library,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<RosterEntry> {
        names
            .iter()
            .map(|name| RosterEntry {
                artist: name.to_string(),
                album_count: 1,
            })
            .collect()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn set(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn splits_both_directions_sorted() {
        let result = reconcile(
            &roster(&["Beatles", "Kinks", "Zombies"]),
            &strings(&["Kinks", "Who"]),
            &FxHashSet::default(),
        )
        .unwrap();

        assert_eq!(result.missing_from_followed, strings(&["Beatles", "Zombies"]));
        assert_eq!(result.missing_from_library, strings(&["Who"]));
    }

    #[test]
    fn excluded_artists_leave_missing_from_followed() {
        let result = reconcile(
            &roster(&["Beatles", "Kinks", "Zombies"]),
            &strings(&["Kinks"]),
            &set(&["Zombies"]),
        )
        .unwrap();

        assert_eq!(result.missing_from_followed, strings(&["Beatles"]));
    }

    #[test]
    fn exclusion_does_not_suppress_library_absence() {
        // "Who" is followed and excluded but not owned; it still shows up.
        let result = reconcile(
            &roster(&["Beatles"]),
            &strings(&["Who"]),
            &set(&["Who", "Beatles"]),
        )
        .unwrap();

        assert_eq!(result.missing_from_followed, Vec::<String>::new());
        assert_eq!(result.missing_from_library, strings(&["Who"]));
    }

    #[test]
    fn fully_covered_roster_reports_nothing_missing() {
        let result = reconcile(
            &roster(&["Beatles", "Kinks"]),
            &strings(&["Beatles", "Kinks"]),
            &FxHashSet::default(),
        )
        .unwrap();

        assert!(result.missing_from_followed.is_empty());
        assert!(result.missing_from_library.is_empty());
    }

    #[test]
    fn empty_followed_list_reports_whole_roster() {
        let result = reconcile(&roster(&["B", "A"]), &[], &FxHashSet::default()).unwrap();
        assert_eq!(result.missing_from_followed, strings(&["A", "B"]));
        assert!(result.missing_from_library.is_empty());
    }

    #[test]
    fn duplicate_followed_names_collapse() {
        let result = reconcile(
            &roster(&["Beatles"]),
            &strings(&["Who", "Who"]),
            &FxHashSet::default(),
        )
        .unwrap();

        assert_eq!(result.missing_from_library, strings(&["Who"]));
    }

    #[test]
    fn empty_roster_yields_none() {
        assert_eq!(
            reconcile(&[], &strings(&["Who"]), &FxHashSet::default()),
            None
        );
    }
}
