//! Boundary validation of catalog snapshots.
//!
//! The engine in `oeuvre-core` trusts the snapshot it is given. Rules the
//! store is expected to guarantee are checked here once, at load time.
//! References the engine already tolerates (dangling parents, tracks that
//! point nowhere, repeated track associations) are only logged.

use std::collections::{HashMap, HashSet};
use std::fmt;

use oeuvre_core::model::{MilestoneId, WorkId};
use oeuvre_core::Catalog;

use crate::error::{StoreError, StoreResult};

/// One broken boundary rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DuplicateWorkId(WorkId),
    DuplicateMilestoneId(MilestoneId),
    EmptyTitle(WorkId),
    /// Neither a written date nor a creation timestamp.
    Undated { id: WorkId, title: String },
    /// The parent is itself a derivative, or the work is its own parent.
    NestedParent {
        id: WorkId,
        title: String,
        parent: WorkId,
    },
    UndatedStandardMilestone { id: MilestoneId, name: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateWorkId(id) => write!(f, "work id {id} appears more than once"),
            Self::DuplicateMilestoneId(id) => {
                write!(f, "milestone id {id} appears more than once")
            }
            Self::EmptyTitle(id) => write!(f, "work {id} has an empty title"),
            Self::Undated { id, title } => {
                write!(f, "work '{title}' ({id}) has no written date or creation time")
            }
            Self::NestedParent { id, title, parent } => write!(
                f,
                "work '{title}' ({id}) names {parent} as parent, which is not an original work"
            ),
            Self::UndatedStandardMilestone { id, name } => {
                write!(f, "standard milestone '{name}' ({id}) has no release date")
            }
        }
    }
}

/// Collect every violation in `catalog`.
pub fn validate(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut seen = HashSet::new();
    for work in &catalog.works {
        if !seen.insert(work.id) {
            violations.push(Violation::DuplicateWorkId(work.id));
        }
        if work.title.trim().is_empty() {
            violations.push(Violation::EmptyTitle(work.id));
        }
        if work.date_written.is_none() && work.created_at.is_none() {
            violations.push(Violation::Undated {
                id: work.id,
                title: work.title.clone(),
            });
        }
    }

    let parents: HashMap<WorkId, Option<WorkId>> =
        catalog.works.iter().map(|w| (w.id, w.parent_id)).collect();
    for work in &catalog.works {
        let Some(parent) = work.parent_id else {
            continue;
        };
        let Some(grandparent) = parents.get(&parent) else {
            log::info!(
                "Work '{}' names unknown parent {}; treating it as standalone",
                work.title,
                parent
            );
            continue;
        };
        if parent == work.id || grandparent.is_some() {
            violations.push(Violation::NestedParent {
                id: work.id,
                title: work.title.clone(),
                parent,
            });
        }
    }

    let mut seen = HashSet::new();
    for milestone in &catalog.milestones {
        if !seen.insert(milestone.id) {
            violations.push(Violation::DuplicateMilestoneId(milestone.id));
        }
        if milestone.is_standard() && milestone.release_date.is_none() {
            violations.push(Violation::UndatedStandardMilestone {
                id: milestone.id,
                name: milestone.name.clone(),
            });
        }
    }

    log_track_anomalies(catalog, &seen);
    violations
}

fn log_track_anomalies(catalog: &Catalog, milestone_ids: &HashSet<MilestoneId>) {
    let work_ids: HashSet<WorkId> = catalog.works.iter().map(|w| w.id).collect();
    let mut pairs = HashSet::new();
    for track in &catalog.milestone_tracks {
        if !work_ids.contains(&track.work_id) || !milestone_ids.contains(&track.milestone_id) {
            log::info!(
                "Track {} -> {} references a missing work or milestone",
                track.work_id,
                track.milestone_id
            );
        }
        if !pairs.insert((track.work_id, track.milestone_id)) {
            log::info!(
                "Work {} is listed on milestone {} more than once",
                track.work_id,
                track.milestone_id
            );
        }
    }
}

/// Validate and fail on any violation, or with `lenient` only warn.
pub fn enforce(catalog: &Catalog, lenient: bool) -> StoreResult<()> {
    let violations = validate(catalog);
    if violations.is_empty() {
        return Ok(());
    }
    for violation in &violations {
        log::warn!("{violation}");
    }
    if lenient {
        log::warn!(
            "Continuing with {} violation(s) in lenient mode",
            violations.len()
        );
        Ok(())
    } else {
        Err(StoreError::Invalid(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use oeuvre_core::model::{MilestoneKind, MilestoneTrack};
    use oeuvre_core::{Milestone, Work};

    fn dated(title: &str) -> Work {
        Work::new(title).with_date_written(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
    }

    #[test]
    fn test_clean_catalog_has_no_violations() {
        let original = dated("Night Drive");
        let take = dated("Night Drive (Demo)").with_parent(original.id);
        let alpha = Milestone::standard("Alpha", 2025, 12, 1);
        let track = MilestoneTrack::new(original.id, alpha.id, 1);
        let catalog = Catalog::new(vec![original, take], vec![alpha], vec![track]);
        assert!(validate(&catalog).is_empty());
        assert!(enforce(&catalog, false).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let work = dated("a");
        let alpha = Milestone::standard("Alpha", 2025, 12, 1);
        let catalog = Catalog::new(
            vec![work.clone(), work.clone()],
            vec![alpha.clone(), alpha.clone()],
            vec![],
        );
        let violations = validate(&catalog);
        assert!(violations.contains(&Violation::DuplicateWorkId(work.id)));
        assert!(violations.contains(&Violation::DuplicateMilestoneId(alpha.id)));
    }

    #[test]
    fn test_empty_title_and_missing_dates() {
        let blank = dated("   ");
        let undated = Work::new("Floating");
        let catalog = Catalog::new(vec![blank.clone(), undated.clone()], vec![], vec![]);
        let violations = validate(&catalog);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0], Violation::EmptyTitle(blank.id));
        assert!(matches!(violations[1], Violation::Undated { id, .. } if id == undated.id));
    }

    #[test]
    fn test_nested_and_self_parents() {
        let root = dated("root");
        let child = dated("child").with_parent(root.id);
        let grandchild = dated("grandchild").with_parent(child.id);
        let mut own = dated("own");
        own.parent_id = Some(own.id);
        let catalog = Catalog::new(vec![root, child, grandchild.clone(), own.clone()], vec![], vec![]);

        let nested: Vec<WorkId> = validate(&catalog)
            .into_iter()
            .filter_map(|v| match v {
                Violation::NestedParent { id, .. } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(nested, vec![grandchild.id, own.id]);
    }

    #[test]
    fn test_dangling_references_are_tolerated() {
        let orphan = dated("orphan").with_parent(WorkId::new());
        let ghost_track = MilestoneTrack::new(orphan.id, MilestoneId::new(), 1);
        let catalog = Catalog::new(vec![orphan], vec![], vec![ghost_track, ghost_track]);
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn test_only_standard_milestones_need_dates() {
        let undated = Milestone::new("Alpha");
        let deluxe = Milestone::new("Alpha Deluxe").with_kind(MilestoneKind::Deluxe);
        let catalog = Catalog::new(vec![], vec![undated.clone(), deluxe], vec![]);
        assert_eq!(
            validate(&catalog),
            vec![Violation::UndatedStandardMilestone {
                id: undated.id,
                name: "Alpha".to_string(),
            }]
        );
    }

    #[test]
    fn test_enforce_lenient_downgrades() {
        let catalog = Catalog::new(vec![Work::new("Floating")], vec![], vec![]);
        let err = enforce(&catalog, false).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.to_string().contains("1 violation(s)"));
        assert!(enforce(&catalog, true).is_ok());
    }
}
