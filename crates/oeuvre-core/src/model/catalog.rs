use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::ids::{MilestoneId, WorkId};
use crate::model::milestone::Milestone;
use crate::model::track::MilestoneTrack;
use crate::model::work::{Category, Work};

/// An immutable snapshot of the catalog as handed over by the data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub works: Vec<Work>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    #[serde(default, alias = "album_tracks")]
    pub milestone_tracks: Vec<MilestoneTrack>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        works: Vec<Work>,
        milestones: Vec<Milestone>,
        milestone_tracks: Vec<MilestoneTrack>,
    ) -> Self {
        Self {
            works,
            milestones,
            milestone_tracks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty() && self.milestones.is_empty()
    }

    /// A copy of this catalog restricted to works of one category.
    ///
    /// Milestones and track associations are kept as they are.
    #[must_use]
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            works: self
                .works
                .iter()
                .filter(|w| w.category == category)
                .cloned()
                .collect(),
            milestones: self.milestones.clone(),
            milestone_tracks: self.milestone_tracks.clone(),
        }
    }

    pub fn work(&self, id: WorkId) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    pub fn milestone(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Find works by id or by case-insensitive title.
    pub fn find_works(&self, id_or_title: &str) -> Result<Vec<&Work>> {
        if let Ok(id) = id_or_title.parse::<WorkId>() {
            return self
                .work(id)
                .map(|w| vec![w])
                .ok_or_else(|| Error::NotFound {
                    entity: "work",
                    id: id_or_title.to_string(),
                });
        }
        let matches: Vec<&Work> = self
            .works
            .iter()
            .filter(|w| w.title.trim().eq_ignore_ascii_case(id_or_title.trim()))
            .collect();
        if matches.is_empty() {
            return Err(Error::NotFound {
                entity: "work",
                id: id_or_title.to_string(),
            });
        }
        Ok(matches)
    }

    /// Find a milestone by id or by case-insensitive name.
    pub fn find_milestone(&self, id_or_name: &str) -> Result<&Milestone> {
        let found = match id_or_name.parse::<MilestoneId>() {
            Ok(id) => self.milestone(id),
            Err(_) => self
                .milestones
                .iter()
                .find(|m| m.name.trim().eq_ignore_ascii_case(id_or_name.trim())),
        };
        found.ok_or_else(|| Error::NotFound {
            entity: "milestone",
            id: id_or_name.to_string(),
        })
    }

    /// The parent of a derivative work, if it resolves.
    pub fn parent_of(&self, work: &Work) -> Option<&Work> {
        work.parent_id.and_then(|id| self.work(id))
    }

    /// Works whose `parent_id` names `id`, in catalog order.
    pub fn derivatives_of(&self, id: WorkId) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| w.parent_id == Some(id))
            .collect()
    }

    /// Session takes of a work.
    pub fn sessions_of(&self, id: WorkId) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| w.is_session() && w.parent_id == Some(id))
            .collect()
    }

    /// The tracklist of a milestone ordered by position.
    ///
    /// Associations pointing at unknown works are skipped.
    pub fn tracklist(&self, milestone: MilestoneId) -> Vec<(u32, &Work)> {
        let mut tracks: Vec<(u32, &Work)> = self
            .milestone_tracks
            .iter()
            .filter(|t| t.milestone_id == milestone)
            .filter_map(|t| self.work(t.work_id).map(|w| (t.position, w)))
            .collect();
        tracks.sort_by_key(|(position, _)| *position);
        tracks
    }

    /// The standard milestone an edition was derived from.
    pub fn origin_of(&self, milestone: &Milestone) -> Option<&Milestone> {
        milestone
            .parent_milestone_id
            .and_then(|id| self.milestone(id))
    }

    /// Editions derived from a milestone.
    pub fn editions_of(&self, id: MilestoneId) -> Vec<&Milestone> {
        self.milestones
            .iter()
            .filter(|m| m.parent_milestone_id == Some(id))
            .collect()
    }

    /// Work id to the name of the first milestone it was placed on.
    pub fn milestone_names_by_work(&self) -> HashMap<WorkId, &str> {
        let names: HashMap<MilestoneId, &str> = self
            .milestones
            .iter()
            .map(|m| (m.id, m.name.as_str()))
            .collect();
        let mut by_work = HashMap::new();
        for track in &self.milestone_tracks {
            if let Some(name) = names.get(&track.milestone_id) {
                by_work.entry(track.work_id).or_insert(*name);
            }
        }
        by_work
    }
}
