//! Display-image resolution.
//!
//! A work placed on a milestone is shown with the milestone's cover; other
//! works fall back to their own image.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::{Milestone, MilestoneTrack, Work, WorkId};

/// Work id to the cover of the milestone the work was first placed on.
///
/// A work appears at most once. When the data places a work on several
/// milestones the first association seen wins, even if that milestone has no
/// cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverIndex {
    covers: HashMap<WorkId, Option<String>>,
}

impl CoverIndex {
    pub fn build(tracks: &[MilestoneTrack], milestones: &[Milestone]) -> Self {
        let by_id: HashMap<_, &Milestone> = milestones.iter().map(|m| (m.id, m)).collect();
        let mut covers = HashMap::new();

        for track in tracks {
            let Some(milestone) = by_id.get(&track.milestone_id) else {
                log::debug!(
                    "Track for work {} points at unknown milestone {}",
                    track.work_id,
                    track.milestone_id
                );
                continue;
            };
            match covers.entry(track.work_id) {
                Entry::Vacant(e) => {
                    e.insert(milestone.cover().map(str::to_string));
                }
                Entry::Occupied(_) => {
                    log::debug!(
                        "Work {} is also on milestone '{}'; keeping its first association",
                        track.work_id,
                        milestone.name
                    );
                }
            }
        }

        Self { covers }
    }

    pub fn cover_for(&self, id: WorkId) -> Option<&str> {
        self.covers.get(&id).and_then(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.covers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covers.is_empty()
    }
}

/// The image that represents `work`: its milestone's cover, else its own
/// image, else nothing.
pub fn resolve_image<'a>(work: &'a Work, index: &'a CoverIndex) -> Option<&'a str> {
    index.cover_for(work.id).or_else(|| {
        work.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_cover_wins() {
        let work = Work::new("a").with_image("own.png");
        let alpha = Milestone::standard("Alpha", 2025, 12, 1).with_cover("alpha.png");
        let index = CoverIndex::build(&[MilestoneTrack::new(work.id, alpha.id, 1)], &[alpha]);
        assert_eq!(resolve_image(&work, &index), Some("alpha.png"));
    }

    #[test]
    fn test_falls_back_to_own_image() {
        let work = Work::new("a").with_image("own.png");
        let bare = Milestone::standard("Bare", 2025, 12, 1);
        let index = CoverIndex::build(&[MilestoneTrack::new(work.id, bare.id, 1)], &[bare]);
        assert_eq!(resolve_image(&work, &index), Some("own.png"));
        assert_eq!(resolve_image(&work, &CoverIndex::default()), Some("own.png"));
    }

    #[test]
    fn test_no_image_at_all() {
        let work = Work::new("a").with_image("");
        assert_eq!(resolve_image(&work, &CoverIndex::default()), None);
    }

    #[test]
    fn test_first_association_wins() {
        let work = Work::new("a");
        let first = Milestone::standard("First", 2025, 12, 1).with_cover("first.png");
        let second = Milestone::standard("Second", 2026, 1, 1).with_cover("second.png");
        let tracks = [
            MilestoneTrack::new(work.id, first.id, 1),
            MilestoneTrack::new(work.id, second.id, 4),
        ];
        let index = CoverIndex::build(&tracks, &[first, second]);
        assert_eq!(index.len(), 1);
        assert_eq!(resolve_image(&work, &index), Some("first.png"));
    }

    #[test]
    fn test_unknown_milestone_is_ignored() {
        let work = Work::new("a");
        let ghost = Milestone::standard("Ghost", 2025, 12, 1).with_cover("ghost.png");
        let index = CoverIndex::build(&[MilestoneTrack::new(work.id, ghost.id, 1)], &[]);
        assert!(index.is_empty());
    }
}
