//! Reading catalog snapshots exported by the data store.

use std::path::Path;

use oeuvre_core::Catalog;

use crate::error::{StoreError, StoreResult};
use crate::validate;

/// Parse a snapshot document.
///
/// Missing collections default to empty and null columns take their
/// defaults. A milestone without a type is standard; unrecognised types are
/// kept as non-standard editions.
pub fn parse_catalog(json: &str) -> StoreResult<Catalog> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the snapshot at `path` without validating it.
pub fn load_catalog(path: &Path) -> StoreResult<Catalog> {
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&json)?;
    log::info!(
        "Loaded catalog from {}: {} works, {} milestones, {} tracks",
        path.display(),
        catalog.works.len(),
        catalog.milestones.len(),
        catalog.milestone_tracks.len()
    );
    Ok(catalog)
}

/// Read, parse and validate the snapshot at `path`.
///
/// With `lenient` set, violations are logged instead of failing the load.
pub fn load_validated(path: &Path, lenient: bool) -> StoreResult<Catalog> {
    let catalog = load_catalog(path)?;
    validate::enforce(&catalog, lenient)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oeuvre_core::model::{Category, MilestoneKind, ReleaseStatus, SubCategory};

    const SNAPSHOT: &str = r#"{
        "works": [
            {
                "id": "6f1c2a52-1d0e-4c33-9a55-2c1f0d3b8a01",
                "title": "Night Drive",
                "category": "Full",
                "sub_category": "released",
                "date_written": "2025-12-02",
                "created_at": "2025-12-02T18:30:00+00:00",
                "producer": "Kay"
            },
            {
                "id": "6f1c2a52-1d0e-4c33-9a55-2c1f0d3b8a02",
                "title": "Night Drive (Demo)",
                "sub_category": "Sessions",
                "created_at": "2025-12-03 09:15:00+00",
                "parent_id": "6f1c2a52-1d0e-4c33-9a55-2c1f0d3b8a01"
            }
        ],
        "milestones": [
            {
                "id": "9b0e7c11-5a7f-4d2e-8f00-1a2b3c4d5e01",
                "name": "Alpha",
                "release_date": "2025-12-01",
                "album_type": null
            },
            {
                "id": "9b0e7c11-5a7f-4d2e-8f00-1a2b3c4d5e02",
                "name": "Alpha (Deluxe)",
                "release_date": "2026-02-01",
                "album_type": "deluxe",
                "parent_album_id": "9b0e7c11-5a7f-4d2e-8f00-1a2b3c4d5e01"
            }
        ],
        "album_tracks": [
            {
                "song_id": "6f1c2a52-1d0e-4c33-9a55-2c1f0d3b8a01",
                "album_id": "9b0e7c11-5a7f-4d2e-8f00-1a2b3c4d5e01",
                "track_number": 1
            }
        ]
    }"#;

    #[test]
    fn test_parse_store_export() {
        let catalog = parse_catalog(SNAPSHOT).unwrap();
        assert_eq!(catalog.works.len(), 2);
        assert_eq!(catalog.works[0].category, Category::Full);
        assert_eq!(catalog.works[0].sub_category, SubCategory::Released);
        assert!(catalog.works[1].date_written.is_none());
        assert!(catalog.works[1].created_at.is_some());
        assert_eq!(catalog.works[1].parent_id, Some(catalog.works[0].id));

        assert_eq!(catalog.milestones[0].kind, MilestoneKind::Standard);
        assert_eq!(catalog.milestones[1].kind, MilestoneKind::Deluxe);
        assert_eq!(
            catalog.milestones[1].parent_milestone_id,
            Some(catalog.milestones[0].id)
        );
        assert_eq!(catalog.milestone_tracks.len(), 1);
        assert_eq!(catalog.milestone_tracks[0].position, 1);
    }

    const NULLABLE_COLUMNS: &str = r#"{
        "works": [
            {
                "id": "6f1c2a52-1d0e-4c33-9a55-2c1f0d3b8a11",
                "title": "Glass House",
                "category": null,
                "sub_category": null,
                "alternate_names": null,
                "date_written": "2025-12-10"
            }
        ],
        "milestones": [
            {
                "id": "9b0e7c11-5a7f-4d2e-8f00-1a2b3c4d5e11",
                "name": "Alpha",
                "release_date": "2025-12-01",
                "album_type": "Standard",
                "status": null
            },
            {
                "id": "9b0e7c11-5a7f-4d2e-8f00-1a2b3c4d5e12",
                "name": "Alpha (Remaster)",
                "release_date": "2026-03-01",
                "album_type": "remaster",
                "status": "released"
            }
        ]
    }"#;

    #[test]
    fn test_null_work_columns_fall_back_to_defaults() {
        let catalog = parse_catalog(NULLABLE_COLUMNS).unwrap();
        let work = &catalog.works[0];
        assert_eq!(work.category, Category::Full);
        assert_eq!(work.sub_category, SubCategory::Released);
        assert!(work.alternate_names.is_empty());
        assert!(work.is_released());
    }

    #[test]
    fn test_milestone_types_beyond_the_known_ones() {
        let catalog = parse_catalog(NULLABLE_COLUMNS).unwrap();
        let alpha = &catalog.milestones[0];
        assert_eq!(alpha.kind, MilestoneKind::Standard);
        assert!(alpha.is_standard());
        assert_eq!(alpha.status, ReleaseStatus::Unreleased);

        let remaster = &catalog.milestones[1];
        assert_eq!(remaster.kind, MilestoneKind::Other("remaster".to_string()));
        assert!(!remaster.is_standard());
        assert_eq!(remaster.status, ReleaseStatus::Released);
    }

    #[test]
    fn test_nullable_snapshot_loads_and_validates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, NULLABLE_COLUMNS).unwrap();

        let catalog = load_validated(&path, false).unwrap();
        assert_eq!(catalog.works.len(), 1);
        assert_eq!(catalog.milestones.len(), 2);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let catalog = parse_catalog("{}").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.milestone_tracks.is_empty());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = parse_catalog("{ works: ").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_catalog(Path::new("/nonexistent/oeuvre/catalog.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/oeuvre/catalog.json"));
    }
}
