use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rustc_hash::FxHashSet;

use roster_audit::models::{AlbumRecord, ArtistRow, CleanupReview, RawAlbumRow, RunSummary};
use roster_audit::normalize::RenameTable;
use roster_audit::sources::LoadError;
use roster_audit::{catalog, progress, reconcile, report, roster, sources};

#[derive(Parser)]
#[command(name = "roster-audit")]
#[command(
    about = "Normalize a music library export and reconcile its artist roster against a followed-artists list"
)]
struct Args {
    /// Artist export CSV (a `name` column)
    artists: PathBuf,

    /// Album export CSV (`title`, `artist`, `releasedDate` columns)
    albums: PathBuf,

    /// Artist rename table, colon-delimited (`Original Name`, `Cleaned Name`)
    #[arg(long)]
    renames: Option<PathBuf>,

    /// Followed-artists list, one name per line
    #[arg(long)]
    followed: Option<PathBuf>,

    /// Exclude list, one name per line; rewritten sorted and deduplicated
    #[arg(long)]
    exclude: Option<PathBuf>,

    /// Write artists missing from the followed list here, one per line
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the run summary to this JSON file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Album-count threshold for the top-artists view
    #[arg(long, default_value = "3")]
    top: usize,

    /// Print the full roster
    #[arg(long)]
    show_roster: bool,

    /// Print the top-artists view
    #[arg(long)]
    show_top: bool,

    /// Print the normalized album table
    #[arg(long)]
    show_albums: bool,

    /// Print the titles the cleaner changed
    #[arg(long)]
    show_review: bool,

    /// Print the exclude list, sorted
    #[arg(long)]
    show_excluded: bool,

    /// Print the followed list, sorted
    #[arg(long)]
    show_followed: bool,

    /// Hide progress bars and log the run summary to stderr
    #[arg(long)]
    quiet: bool,
}

fn load_or_empty<T>(label: &str, result: Result<Vec<T>, LoadError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("Error loading {}: {}", label, err);
            Vec::new()
        }
    }
}

fn load_renames(path: Option<&Path>) -> RenameTable {
    match path {
        Some(path) => match sources::load_rename_table(path) {
            Ok(table) => {
                println!(
                    "Loaded {} rename entries from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(err) => {
                eprintln!("Error loading rename table: {}", err);
                RenameTable::default()
            }
        },
        None => RenameTable::default(),
    }
}

fn load_excluded(path: Option<&Path>) -> FxHashSet<String> {
    match path {
        Some(path) => match sources::load_exclude_list(path) {
            Ok(set) => {
                println!(
                    "Loaded {} excluded artists from {}",
                    set.len(),
                    path.display()
                );
                set
            }
            Err(err) => {
                eprintln!("Error loading exclude list: {}", err);
                FxHashSet::default()
            }
        },
        None => FxHashSet::default(),
    }
}

fn normalize_phase(
    raw_artists: Vec<ArtistRow>,
    raw_albums: Vec<RawAlbumRow>,
    renames: &RenameTable,
) -> (Vec<ArtistRow>, Vec<AlbumRecord>, Vec<CleanupReview>) {
    let artists = catalog::normalize_artists(raw_artists, renames);

    let pb = progress::create_progress_bar(raw_albums.len() as u64, "Phase 2: Normalizing albums");
    let mut albums = Vec::with_capacity(raw_albums.len());
    let mut review = Vec::new();
    for row in raw_albums {
        let (record, changed) = catalog::normalize_album_row(row, renames);
        if let Some(entry) = changed {
            review.push(entry);
        }
        albums.push(record);
        pb.inc(1);
    }
    pb.finish_with_message(format!(
        "Phase 2: Normalized {} albums ({} titles cleaned)",
        albums.len(),
        review.len()
    ));

    (artists, albums, review)
}

fn main() -> Result<()> {
    let args = Args::parse();
    progress::set_quiet(args.quiet);

    let start = Instant::now();
    let mut summary = RunSummary::default();

    let renames = load_renames(args.renames.as_deref());
    summary.rename_entries = renames.len();

    // A failed load leaves that table empty; the run continues with
    // whatever did load.
    let spinner = progress::create_spinner("Phase 1: Loading library exports");
    let raw_artists = load_or_empty("artist export", sources::load_artist_rows(&args.artists));
    let raw_albums = load_or_empty("album export", sources::load_album_rows(&args.albums));
    spinner.finish_with_message(format!(
        "Phase 1: Loaded {} artist rows, {} album rows",
        raw_artists.len(),
        raw_albums.len()
    ));

    summary.artists_loaded = raw_artists.len();
    summary.albums_loaded = raw_albums.len();
    summary.renames_applied = raw_artists
        .iter()
        .filter(|r| renames.is_mapped(&r.name))
        .count()
        + raw_albums
            .iter()
            .filter(|r| renames.is_mapped(&r.artist))
            .count();

    let (artists, albums, review) = normalize_phase(raw_artists, raw_albums, &renames);
    summary.titles_cleaned = review.len();
    summary.dates_unparsed = albums.iter().filter(|a| a.release_year.is_none()).count();

    let roster = match roster::aggregate(&artists, &albums) {
        Some(roster) => {
            println!("Phase 3: Aggregated roster of {} artists", roster.len());
            roster
        }
        None => {
            println!("No artist or album data loaded.");
            Vec::new()
        }
    };
    summary.roster_size = roster.len();

    let excluded = load_excluded(args.exclude.as_deref());
    let followed = match args.followed.as_deref() {
        Some(path) => load_or_empty("followed list", sources::load_followed_artists(path)),
        None => Vec::new(),
    };
    summary.excluded_count = excluded.len();
    summary.followed_count = followed.len();

    let reconciliation = if args.followed.is_some() {
        match reconcile::reconcile(&roster, &followed, &excluded) {
            Some(result) => Some(result),
            None => {
                println!("No artist data available for comparison.");
                None
            }
        }
    } else {
        None
    };

    match &reconciliation {
        Some(result) => {
            summary.missing_from_followed = result.missing_from_followed.len();
            summary.missing_from_library = result.missing_from_library.len();
            report::print_reconciliation(result);

            if let Some(path) = &args.export {
                if result.missing_from_followed.is_empty() {
                    println!("No missing artists to export.");
                } else {
                    match sources::write_artist_lines(path, &result.missing_from_followed) {
                        Ok(()) => println!(
                            "Exported {} missing artists to {}",
                            result.missing_from_followed.len(),
                            path.display()
                        ),
                        Err(err) => eprintln!("Error exporting missing artists: {}", err),
                    }
                }
            }
        }
        None => {
            if args.export.is_some() {
                eprintln!("Nothing to export: reconciliation needs --followed and library data.");
            }
        }
    }

    if args.show_roster {
        report::print_roster(&roster);
    }
    if args.show_top {
        report::print_top(&roster::top_artists(&roster, args.top), args.top);
    }
    if args.show_albums {
        report::print_albums(&albums);
    }
    if args.show_review {
        report::print_review(&review);
    }
    if args.show_excluded {
        report::print_sorted_names("Excluded artists", excluded.iter().map(String::as_str));
    }
    if args.show_followed {
        report::print_sorted_names("Followed artists", followed.iter().map(String::as_str));
    }

    summary.elapsed_seconds = start.elapsed().as_secs_f64();

    println!("\n{:=<60}", "");
    println!("Audit complete!");
    println!("  Artist rows: {}", summary.artists_loaded);
    println!(
        "  Album rows: {} ({} titles cleaned, {} without a release year)",
        summary.albums_loaded, summary.titles_cleaned, summary.dates_unparsed
    );
    println!("  Roster: {} artists", summary.roster_size);
    if reconciliation.is_some() {
        println!(
            "  In library, not followed: {}",
            summary.missing_from_followed
        );
        println!(
            "  Followed, not in library: {}",
            summary.missing_from_library
        );
    }
    println!("  Elapsed: {:.2}s", summary.elapsed_seconds);
    println!("{:=<60}", "");

    if args.quiet {
        summary.log();
    }

    if let Some(path) = &args.stats {
        summary
            .write_to_file(path)
            .with_context(|| format!("Failed to write run summary to {}", path.display()))?;
        println!("Run summary written to {}", path.display());
    }

    Ok(())
}
