//! Era classification.
//!
//! A fixed cutoff instant closes the Early Era. After it, every standard
//! milestone opens an era that runs until the next standard milestone's
//! release. The first milestone's era opens on a fixed day right after the
//! cutoff so it also claims works written before its release.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use oeuvre_core::era::{classify, EraConfig};
//! use oeuvre_core::model::{Milestone, Work};
//!
//! let milestones = vec![
//!     Milestone::standard("Alpha", 2025, 12, 1),
//!     Milestone::standard("Beta", 2026, 2, 15),
//! ];
//! let work = Work::new("Night Drive")
//!     .with_date_written(NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
//! assert_eq!(classify(&work, &milestones, &EraConfig::default()), "Alpha Era");
//! ```

pub mod partition;

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{Milestone, Work};

pub use partition::{partition, EraBucket};

pub const EARLY_ERA: &str = "Early Era";
pub const POST_EARLY_ERA: &str = "Post Early Era";
pub const UNKNOWN_ERA: &str = "Unknown Era";

/// The two fixed instants the era rules hinge on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraConfig {
    /// Last instant (inclusive) of the Early Era.
    pub early_cutoff: NaiveDateTime,
    /// Lower bound of the first milestone era.
    pub first_era_start: NaiveDateTime,
}

impl Default for EraConfig {
    fn default() -> Self {
        Self {
            early_cutoff: at(2025, 11, 20, 23, 59, 59),
            first_era_start: at(2025, 11, 21, 0, 0, 0),
        }
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, sec))
        .unwrap_or_default()
}

impl EraConfig {
    /// Parse the bounds from configuration strings.
    ///
    /// The cutoff accepts `YYYY-MM-DDTHH:MM:SS` or a bare date meaning the end
    /// of that day. The first era start accepts the same forms, a bare date
    /// meaning the start of that day.
    pub fn parse(early_cutoff: &str, first_era_start: &str) -> Result<Self> {
        let early_cutoff = parse_bound(early_cutoff, (23, 59, 59))?;
        let first_era_start = parse_bound(first_era_start, (0, 0, 0))?;
        if first_era_start <= early_cutoff {
            return Err(Error::InvalidData(format!(
                "first era start {first_era_start} must come after the early era cutoff {early_cutoff}"
            )));
        }
        Ok(Self {
            early_cutoff,
            first_era_start,
        })
    }
}

fn parse_bound(raw: &str, time_of_day: (u32, u32, u32)) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    let (hour, min, sec) = time_of_day;
    date.and_hms_opt(hour, min, sec)
        .ok_or_else(|| Error::InvalidData(format!("invalid time of day for {raw}")))
}

/// The half-open interval `[start, end)` covered by one milestone era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraSpan {
    pub label: String,
    pub start: NaiveDateTime,
    /// `None` for the last era, which is unbounded.
    pub end: Option<NaiveDateTime>,
}

impl EraSpan {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && self.end.map_or(true, |end| instant < end)
    }
}

/// Era boundaries derived from a milestone set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraTimeline {
    config: EraConfig,
    spans: Vec<EraSpan>,
}

impl EraTimeline {
    /// Compute the era spans from the standard milestones in `milestones`.
    ///
    /// Editions are ignored, as are standard milestones without a release
    /// date. Milestones sharing a release date keep their input order.
    pub fn new(milestones: &[Milestone], config: EraConfig) -> Self {
        let mut standard: Vec<(&Milestone, NaiveDate)> = Vec::new();
        for milestone in milestones.iter().filter(|m| m.is_standard()) {
            match milestone.release_date {
                Some(date) => standard.push((milestone, date)),
                None => log::warn!(
                    "Standard milestone '{}' ({}) has no release date; it opens no era",
                    milestone.name,
                    milestone.id
                ),
            }
        }
        standard.sort_by_key(|(_, date)| *date);

        let starts: Vec<NaiveDateTime> = standard
            .iter()
            .enumerate()
            .map(|(i, (_, date))| {
                if i == 0 {
                    config.first_era_start
                } else {
                    date.and_time(chrono::NaiveTime::MIN)
                }
            })
            .collect();

        let spans = standard
            .iter()
            .enumerate()
            .map(|(i, (milestone, _))| EraSpan {
                label: milestone.era_label(),
                start: starts[i],
                end: starts.get(i + 1).copied(),
            })
            .collect();

        Self { config, spans }
    }

    pub fn config(&self) -> &EraConfig {
        &self.config
    }

    pub fn spans(&self) -> &[EraSpan] {
        &self.spans
    }

    /// Label the era containing `instant`.
    pub fn classify_instant(&self, instant: NaiveDateTime) -> &str {
        if instant <= self.config.early_cutoff {
            return EARLY_ERA;
        }
        if self.spans.is_empty() {
            return POST_EARLY_ERA;
        }
        self.spans
            .iter()
            .find(|span| span.contains(instant))
            .map_or(UNKNOWN_ERA, |span| span.label.as_str())
    }

    /// Label the era of a work.
    ///
    /// An undated work violates the data-layer contract; it is reported and
    /// labelled [`UNKNOWN_ERA`].
    pub fn classify(&self, work: &Work) -> &str {
        if let Some(instant) = work.instant() {
            self.classify_instant(instant)
        } else {
            log::warn!(
                "Work '{}' ({}) has neither a written date nor a creation time",
                work.title,
                work.id
            );
            UNKNOWN_ERA
        }
    }

    /// Every label this timeline can produce, in chronological order.
    pub fn labels(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut labels = vec![EARLY_ERA];
        for span in &self.spans {
            if seen.insert(span.label.as_str()) {
                labels.push(span.label.as_str());
            }
        }
        if self.spans.is_empty() {
            labels.push(POST_EARLY_ERA);
        }
        labels.push(UNKNOWN_ERA);
        labels
    }
}

/// Classify a single work against a milestone set.
pub fn classify(work: &Work, milestones: &[Milestone], config: &EraConfig) -> String {
    EraTimeline::new(milestones, *config)
        .classify(work)
        .to_string()
}
