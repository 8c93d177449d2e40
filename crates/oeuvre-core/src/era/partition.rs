use std::cmp::Ordering;
use std::collections::HashMap;

use crate::era::{EraConfig, EraTimeline};
use crate::model::{Milestone, Work};

/// The works of one era, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct EraBucket<'a> {
    pub name: String,
    pub works: Vec<&'a Work>,
}

impl EraBucket<'_> {
    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }
}

/// Oldest first; undated works after every dated one.
pub(crate) fn oldest_first(a: &Work, b: &Work) -> Ordering {
    match (a.instant(), b.instant()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl EraTimeline {
    /// Partition works into non-empty era buckets in chronological order:
    /// Early Era, milestone eras, Post Early Era, then Unknown Era.
    pub fn partition<'a, I>(&self, works: I) -> Vec<EraBucket<'a>>
    where
        I: IntoIterator<Item = &'a Work>,
    {
        let mut grouped: HashMap<&str, Vec<&'a Work>> = HashMap::new();
        for work in works {
            grouped.entry(self.classify(work)).or_default().push(work);
        }

        self.labels()
            .into_iter()
            .filter_map(|label| {
                let mut works = grouped.remove(label)?;
                works.sort_by(|a, b| oldest_first(a, b));
                Some(EraBucket {
                    name: label.to_string(),
                    works,
                })
            })
            .collect()
    }
}

/// Partition works into ordered era buckets against a milestone set.
pub fn partition<'a, I>(works: I, milestones: &[Milestone], config: &EraConfig) -> Vec<EraBucket<'a>>
where
    I: IntoIterator<Item = &'a Work>,
{
    EraTimeline::new(milestones, *config).partition(works)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::{EARLY_ERA, POST_EARLY_ERA, UNKNOWN_ERA};
    use chrono::NaiveDate;

    fn written(title: &str, year: i32, month: u32, day: u32) -> Work {
        Work::new(title).with_date_written(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    fn names<'a>(buckets: &'a [EraBucket<'_>]) -> Vec<&'a str> {
        buckets.iter().map(|b| b.name.as_str()).collect()
    }

    fn titles<'a>(bucket: &'a EraBucket<'_>) -> Vec<&'a str> {
        bucket.works.iter().map(|w| w.title.as_str()).collect()
    }

    #[test]
    fn test_empty_catalog() {
        let works: Vec<Work> = Vec::new();
        assert!(partition(&works, &[], &EraConfig::default()).is_empty());
    }

    #[test]
    fn test_buckets_are_chronological() {
        let milestones = vec![
            Milestone::standard("Zulu", 2025, 12, 1),
            Milestone::standard("Alpha", 2026, 2, 15),
        ];
        let works = vec![
            written("late", 2026, 3, 1),
            written("early", 2025, 1, 1),
            written("mid", 2025, 12, 5),
        ];
        let buckets = partition(&works, &milestones, &EraConfig::default());
        assert_eq!(names(&buckets), vec![EARLY_ERA, "Zulu Era", "Alpha Era"]);
    }

    #[test]
    fn test_post_early_era_is_last() {
        let works = vec![written("after", 2026, 1, 1), written("before", 2024, 1, 1)];
        let buckets = partition(&works, &[], &EraConfig::default());
        assert_eq!(names(&buckets), vec![EARLY_ERA, POST_EARLY_ERA]);
    }

    #[test]
    fn test_works_sorted_oldest_first() {
        let works = vec![
            written("c", 2025, 3, 1),
            written("a", 2024, 1, 1),
            written("b", 2024, 6, 1),
        ];
        let buckets = partition(&works, &[], &EraConfig::default());
        assert_eq!(titles(&buckets[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_undated_works_are_kept_last() {
        let works = vec![Work::new("undated"), written("dated", 2024, 1, 1)];
        let buckets = partition(&works, &[], &EraConfig::default());
        assert_eq!(names(&buckets), vec![EARLY_ERA, UNKNOWN_ERA]);
        assert_eq!(buckets[1].len(), 1);
    }

    #[test]
    fn test_every_work_lands_in_exactly_one_bucket() {
        let milestones = vec![Milestone::standard("Alpha", 2025, 12, 1)];
        let works = vec![
            written("a", 2025, 11, 1),
            written("b", 2025, 11, 30),
            written("c", 2026, 8, 1),
            Work::new("d"),
        ];
        let buckets = partition(&works, &milestones, &EraConfig::default());
        let total: usize = buckets.iter().map(EraBucket::len).sum();
        assert_eq!(total, works.len());
        assert!(buckets.iter().all(|b| !b.is_empty()));
    }

    #[test]
    fn test_duplicate_milestone_names_share_a_bucket() {
        let milestones = vec![
            Milestone::standard("Echo", 2025, 12, 1),
            Milestone::standard("Echo", 2026, 1, 1),
        ];
        let works = vec![written("a", 2025, 12, 5), written("b", 2026, 1, 5)];
        let buckets = partition(&works, &milestones, &EraConfig::default());
        assert_eq!(names(&buckets), vec!["Echo Era"]);
        assert_eq!(titles(&buckets[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_accepts_borrowed_subsets() {
        let works = vec![written("a", 2024, 1, 1), written("b", 2026, 1, 1)];
        let subset: Vec<&Work> = works.iter().filter(|w| w.title == "b").collect();
        let buckets = partition(subset, &[], &EraConfig::default());
        assert_eq!(names(&buckets), vec![POST_EARLY_ERA]);
    }
}
