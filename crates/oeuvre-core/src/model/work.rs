use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::WorkId;
use crate::model::lenient;

/// The top-level kind of a catalogued work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// A finished, produced song.
    #[default]
    #[serde(alias = "full", alias = "FULL")]
    Full,
    /// Lyrics and melodies that were written but not produced.
    #[serde(alias = "written", alias = "WRITTEN")]
    Written,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("Full"),
            Self::Written => f.write_str("Written"),
        }
    }
}

/// Release-status sub-category of a work.
///
/// The four known statuses are closed variants; anything else the data store
/// holds is preserved verbatim in [`SubCategory::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubCategory {
    #[default]
    Released,
    Unreleased,
    Demos,
    Sessions,
    Other(String),
}

impl SubCategory {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Released => "Released",
            Self::Unreleased => "Unreleased",
            Self::Demos => "Demos",
            Self::Sessions => "Sessions",
            Self::Other(other) => other,
        }
    }

    #[must_use]
    pub fn is_sessions(&self) -> bool {
        matches!(self, Self::Sessions)
    }
}

impl From<String> for SubCategory {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        for known in [Self::Released, Self::Unreleased, Self::Demos, Self::Sessions] {
            if known.as_str().eq_ignore_ascii_case(trimmed) {
                return known;
            }
        }
        Self::Other(value)
    }
}

impl From<&str> for SubCategory {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<SubCategory> for String {
    fn from(value: SubCategory) -> Self {
        match value {
            SubCategory::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued creative work (a song or lyric entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub title: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub category: Category,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub sub_category: SubCategory,

    /// Explicit release flag. When absent the sub-category decides.
    #[serde(default)]
    pub is_released: Option<bool>,

    /// Day the work was written.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date_written: Option<NaiveDate>,

    /// Record-creation timestamp, used when `date_written` is absent.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    /// Original work this one is an alternate take or derivative of.
    #[serde(default)]
    pub parent_id: Option<WorkId>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub alternate_names: Vec<String>,

    #[serde(default)]
    pub producer: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub lyrics: Option<String>,
}

impl Work {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: WorkId::new(),
            title: title.into(),
            category: Category::Full,
            sub_category: SubCategory::Released,
            is_released: None,
            date_written: None,
            created_at: None,
            parent_id: None,
            image_url: None,
            alternate_names: Vec::new(),
            producer: None,
            description: None,
            lyrics: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_sub_category(mut self, sub_category: impl Into<SubCategory>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    #[must_use]
    pub fn with_released(mut self, released: bool) -> Self {
        self.is_released = Some(released);
        self
    }

    #[must_use]
    pub fn with_date_written(mut self, date: NaiveDate) -> Self {
        self.date_written = Some(date);
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: WorkId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    #[must_use]
    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    /// The written/creation instant used for classification and sorting.
    ///
    /// A written date counts from the start of that day. Creation timestamps
    /// are compared in UTC.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.date_written
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .or_else(|| self.created_at.map(|ts| ts.naive_utc()))
    }

    pub fn is_session(&self) -> bool {
        self.sub_category.is_sessions()
    }

    /// Whether the work counts as released, honouring the explicit flag first.
    pub fn is_released(&self) -> bool {
        self.is_released
            .unwrap_or(self.sub_category == SubCategory::Released)
    }

    /// Case-insensitive substring match against the title.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn title_contains(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.title.to_lowercase().contains(needle_lower)
    }
}
