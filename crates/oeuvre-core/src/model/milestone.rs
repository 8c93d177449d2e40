use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::MilestoneId;
use crate::model::lenient;

/// The type of a milestone.
///
/// Only [`MilestoneKind::Standard`] milestones define era boundaries. Editions
/// are derivative annotations of a standard milestone. Types the store holds
/// beyond the known ones are kept in [`MilestoneKind::Other`] and count as
/// non-standard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MilestoneKind {
    #[default]
    Standard,
    Deluxe,
    Anniversary,
    Other(String),
}

impl MilestoneKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard => "standard",
            Self::Deluxe => "deluxe",
            Self::Anniversary => "anniversary",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for MilestoneKind {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        for known in [Self::Standard, Self::Deluxe, Self::Anniversary] {
            if known.as_str().eq_ignore_ascii_case(trimmed) {
                return known;
            }
        }
        if trimmed.is_empty() {
            return Self::Standard;
        }
        Self::Other(value)
    }
}

impl From<MilestoneKind> for String {
    fn from(value: MilestoneKind) -> Self {
        match value {
            MilestoneKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReleaseStatus {
    #[serde(alias = "released", alias = "RELEASED")]
    Released,
    #[default]
    #[serde(alias = "unreleased", alias = "UNRELEASED")]
    Unreleased,
}

/// A dated release event (an album or one of its editions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub name: String,

    /// Required for classification; undated standard milestones are skipped
    /// when computing era boundaries.
    #[serde(default, deserialize_with = "lenient::date")]
    pub release_date: Option<NaiveDate>,

    /// A missing or null type in the store means standard.
    #[serde(default, alias = "album_type", deserialize_with = "lenient::or_default")]
    pub kind: MilestoneKind,

    /// Standard milestone this edition was derived from.
    #[serde(default, alias = "parent_album_id")]
    pub parent_milestone_id: Option<MilestoneId>,

    #[serde(default)]
    pub cover_image_url: Option<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: ReleaseStatus,
}

impl Milestone {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MilestoneId::new(),
            name: name.into(),
            release_date: None,
            kind: MilestoneKind::Standard,
            parent_milestone_id: None,
            cover_image_url: None,
            status: ReleaseStatus::Unreleased,
        }
    }

    /// Convenience constructor for a dated standard milestone.
    ///
    /// Invalid calendar dates leave the milestone undated.
    #[must_use]
    pub fn standard(name: impl Into<String>, year: i32, month: u32, day: u32) -> Self {
        let mut milestone = Self::new(name);
        milestone.release_date = NaiveDate::from_ymd_opt(year, month, day);
        milestone
    }

    #[must_use]
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: MilestoneKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    /// Mark this milestone as an edition of `origin`.
    #[must_use]
    pub fn edition_of(mut self, origin: &Milestone, kind: MilestoneKind) -> Self {
        self.kind = kind;
        self.parent_milestone_id = Some(origin.id);
        self
    }

    pub fn is_standard(&self) -> bool {
        self.kind == MilestoneKind::Standard
    }

    /// The cover reference, ignoring empty strings.
    pub fn cover(&self) -> Option<&str> {
        self.cover_image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// The label of the era this milestone opens.
    pub fn era_label(&self) -> String {
        format!("{} Era", self.name)
    }
}
