//! Integration tests for loading a snapshot and browsing it.
//!
//! Snapshots are written into a temporary directory the way the data store
//! exports them, then fed through validation into the core engine.

use chrono::NaiveDate;
use oeuvre_core::browse::{ArchiveQuery, VisibleEntry};
use oeuvre_core::model::{Category, MilestoneKind, MilestoneTrack};
use oeuvre_core::report::era_report;
use oeuvre_core::{ArchiveBrowser, Catalog, EraConfig, Milestone, TreePath, Work};
use oeuvre_store::{load_catalog, load_validated, StoreError};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_catalog() -> Catalog {
    let alpha = Milestone::standard("Alpha", 2025, 12, 1).with_cover("alpha.png");
    let beta = Milestone::standard("Beta", 2026, 3, 1);
    let deluxe = Milestone::new("Alpha (Deluxe)")
        .with_release_date(day(2026, 1, 15))
        .edition_of(&alpha, MilestoneKind::Deluxe);

    let early = Work::new("First Light").with_date_written(day(2025, 10, 3));
    let drive = Work::new("Night Drive").with_date_written(day(2025, 12, 2));
    let take = Work::new("Night Drive (Demo)")
        .with_sub_category("Sessions")
        .with_date_written(day(2025, 12, 3))
        .with_parent(drive.id);
    let late = Work::new("Paper Planes")
        .with_sub_category("Unreleased")
        .with_date_written(day(2026, 1, 20));
    let spring = Work::new("Spring").with_date_written(day(2026, 3, 2));
    let poem = Work::new("Poem")
        .with_category(Category::Written)
        .with_date_written(day(2025, 12, 5));

    let tracks = vec![MilestoneTrack::new(drive.id, alpha.id, 1)];
    Catalog::new(
        vec![early, drive, take, late, spring, poem],
        vec![alpha, beta, deluxe],
        tracks,
    )
}

fn write_snapshot(dir: &TempDir, catalog: &Catalog) -> std::path::PathBuf {
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(catalog).unwrap()).unwrap();
    path
}

#[test]
fn test_snapshot_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let catalog = sample_catalog();
    let path = write_snapshot(&dir, &catalog);

    let loaded = load_validated(&path, false).unwrap();
    assert_eq!(loaded, catalog);
}

#[test]
fn test_browse_loaded_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, &sample_catalog());
    let catalog = load_validated(&path, false).unwrap().with_category(Category::Full);

    let mut browser = ArchiveBrowser::new(catalog, EraConfig::default());
    let eras: Vec<String> = browser
        .visible_nodes()
        .iter()
        .filter_map(|e| match e {
            VisibleEntry::Folder(node) => Some(node.key.clone()),
            VisibleEntry::Item(_) => None,
        })
        .collect();
    // The deluxe edition never opens an era of its own.
    assert_eq!(eras, vec!["Alpha Era", "Beta Era", "Early Era"]);

    assert!(browser.enter("Alpha Era"));
    assert!(browser.enter("Released"));
    let VisibleEntry::Item(item) = browser.visible_nodes()[0] else {
        panic!("expected a work");
    };
    assert_eq!(item.title, "Night Drive");
    assert_eq!(item.display_image.as_deref(), Some("alpha.png"));

    browser.set_query("paper");
    assert_eq!(browser.path(), &TreePath::from_keys(["Alpha Era"]));
    assert_eq!(browser.tree().leaf_count(), 1);
}

#[test]
fn test_archive_and_report_over_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, &sample_catalog());
    let catalog = load_catalog(&path).unwrap();

    let full = catalog.with_category(Category::Full);
    let listed: Vec<&str> = ArchiveQuery::default()
        .apply(&full.works)
        .iter()
        .map(|w| w.title.as_str())
        .collect();
    assert_eq!(listed, vec!["Spring", "Paper Planes", "Night Drive", "First Light"]);

    let report = era_report(&catalog, &EraConfig::default());
    assert!(report.starts_with("**Total Complete Songs: 4**\n**Total Sessions: 1**"));
    assert!(report.contains("# Alpha Era\n1. **Night Drive** (12/02/2025) [Alpha] [+ Session]\n2. **Paper Planes** (01/20/2026)"));
    assert!(report.ends_with("# Beta Era\n1. **Spring** (03/02/2026)"));
}

#[test]
fn test_invalid_snapshot_is_rejected_unless_lenient() {
    let dir = TempDir::new().unwrap();
    let mut catalog = sample_catalog();
    catalog.works.push(Work::new("Floating"));
    let path = write_snapshot(&dir, &catalog);

    let err = load_validated(&path, false).unwrap_err();
    assert!(matches!(err, StoreError::Invalid(ref v) if v.len() == 1));

    let loaded = load_validated(&path, true).unwrap();
    assert_eq!(loaded.works.len(), 7);
}
