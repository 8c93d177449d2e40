use serde::{Deserialize, Serialize};

use crate::model::ids::{MilestoneId, WorkId};

/// Places a work on a milestone's tracklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneTrack {
    #[serde(alias = "song_id")]
    pub work_id: WorkId,

    #[serde(alias = "album_id")]
    pub milestone_id: MilestoneId,

    /// One-based ordinal on the tracklist.
    #[serde(default, alias = "track_number")]
    pub position: u32,
}

impl MilestoneTrack {
    #[must_use]
    pub const fn new(work_id: WorkId, milestone_id: MilestoneId, position: u32) -> Self {
        Self {
            work_id,
            milestone_id,
            position,
        }
    }
}
