//! The flat archive listing: filter by status and title, sort by title or
//! date.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::{SubCategory, Work};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(SubCategory),
}

impl StatusFilter {
    pub fn matches(&self, work: &Work) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => &work.sub_category == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else if s.trim().is_empty() {
            Err(Error::InvalidData("empty status filter".to_string()))
        } else {
            Ok(Self::Only(SubCategory::from(s)))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    #[default]
    Date,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" | "name" => Ok(Self::Title),
            "date" | "date_written" => Ok(Self::Date),
            other => Err(Error::InvalidData(format!(
                "unknown sort field '{other}' (expected title or date)"
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Date => f.write_str("date"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Filter and sort settings of the archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveQuery {
    pub status: StatusFilter,
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl ArchiveQuery {
    /// Clicking the current field flips the order; a new field sorts
    /// descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Desc;
        }
    }

    /// Apply the query. Session takes never appear in the archive.
    pub fn apply<'a>(&self, works: &'a [Work]) -> Vec<&'a Work> {
        let needle = self.search.to_lowercase();
        let mut listed: Vec<&Work> = works
            .iter()
            .filter(|w| !w.is_session())
            .filter(|w| self.status.matches(w))
            .filter(|w| w.title_contains(&needle))
            .collect();
        listed.sort_by(|a, b| self.compare(a, b));
        listed
    }

    fn compare(&self, a: &Work, b: &Work) -> Ordering {
        let ordering = match self.sort_field {
            SortField::Title => missing_last(non_empty(&a.title), non_empty(&b.title)),
            SortField::Date => missing_last(a.instant(), b.instant()),
        };
        match ordering {
            Keyed::Both(ord) if self.sort_order == SortOrder::Desc => ord.reverse(),
            Keyed::Both(ord) | Keyed::Missing(ord) => ord,
        }
    }
}

fn non_empty(title: &str) -> Option<&str> {
    Some(title).filter(|t| !t.is_empty())
}

/// A comparison that either compared two values or involved a missing one.
enum Keyed {
    Both(Ordering),
    Missing(Ordering),
}

/// Missing values sort last regardless of direction.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Keyed {
    match (a, b) {
        (Some(x), Some(y)) => Keyed::Both(x.cmp(&y)),
        (Some(_), None) => Keyed::Missing(Ordering::Less),
        (None, Some(_)) => Keyed::Missing(Ordering::Greater),
        (None, None) => Keyed::Missing(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn song(title: &str, day: Option<u32>, status: &str) -> Work {
        let work = Work::new(title).with_sub_category(status);
        match day {
            Some(d) => work.with_date_written(NaiveDate::from_ymd_opt(2025, 12, d).unwrap()),
            None => work,
        }
    }

    fn works() -> Vec<Work> {
        vec![
            song("Bravo", Some(2), "Released"),
            song("Alpha", Some(5), "Demos"),
            song("Charlie", None, "Unreleased"),
            song("Alpha (Demo)", Some(9), "Sessions"),
            song("Delta", Some(1), "Released"),
        ]
    }

    fn titles(listed: &[&Work]) -> Vec<String> {
        listed.iter().map(|w| w.title.clone()).collect()
    }

    #[test]
    fn test_default_is_newest_first_without_sessions() {
        let works = works();
        let listed = ArchiveQuery::default().apply(&works);
        assert_eq!(titles(&listed), vec!["Alpha", "Bravo", "Delta", "Charlie"]);
    }

    #[test]
    fn test_ascending_keeps_missing_last() {
        let works = works();
        let query = ArchiveQuery {
            sort_order: SortOrder::Asc,
            ..ArchiveQuery::default()
        };
        assert_eq!(
            titles(&query.apply(&works)),
            vec!["Delta", "Bravo", "Alpha", "Charlie"]
        );
    }

    #[test]
    fn test_sort_by_title() {
        let works = works();
        let mut query = ArchiveQuery::default();
        query.toggle_sort(SortField::Title);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(
            titles(&query.apply(&works)),
            vec!["Delta", "Charlie", "Bravo", "Alpha"]
        );
        query.toggle_sort(SortField::Title);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(
            titles(&query.apply(&works)),
            vec!["Alpha", "Bravo", "Charlie", "Delta"]
        );
    }

    #[test]
    fn test_toggle_sort_on_same_field_flips() {
        let mut query = ArchiveQuery::default();
        query.toggle_sort(SortField::Date);
        assert_eq!(query.sort_order, SortOrder::Asc);
        query.toggle_sort(SortField::Date);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_status_and_search_filters() {
        let works = works();
        let query = ArchiveQuery {
            status: "released".parse().unwrap(),
            ..ArchiveQuery::default()
        };
        assert_eq!(titles(&query.apply(&works)), vec!["Bravo", "Delta"]);

        let query = ArchiveQuery {
            search: "ALP".to_string(),
            ..ArchiveQuery::default()
        };
        assert_eq!(titles(&query.apply(&works)), vec!["Alpha"]);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("".parse::<StatusFilter>().is_err());
        assert_eq!("name".parse::<SortField>().unwrap(), SortField::Title);
        assert!("length".parse::<SortField>().is_err());
    }
}
