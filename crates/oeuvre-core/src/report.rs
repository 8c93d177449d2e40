//! Plain-text exports of the catalog.

use std::collections::HashSet;

use crate::browse::DISPLAY_DATE_FORMAT;
use crate::era::{EraConfig, EraTimeline};
use crate::model::{Catalog, Category, Work, WorkId};

const ENTRY_SEPARATOR: &str = "----------------------------------------";

fn display_date(work: &Work) -> String {
    work.instant().map_or_else(
        || "Unknown Date".to_string(),
        |instant| instant.format(DISPLAY_DATE_FORMAT).to_string(),
    )
}

/// Complete songs grouped by era, oldest first within each era.
///
/// Only full works outside the Sessions status are listed; session takes
/// are counted and flagged on the work they name as parent.
pub fn era_report(catalog: &Catalog, config: &EraConfig) -> String {
    let complete: Vec<&Work> = catalog
        .works
        .iter()
        .filter(|w| w.category == Category::Full && !w.is_session())
        .collect();
    let sessions: Vec<&Work> = catalog.works.iter().filter(|w| w.is_session()).collect();
    let with_session: HashSet<WorkId> = sessions.iter().filter_map(|s| s.parent_id).collect();
    let milestone_names = catalog.milestone_names_by_work();

    let mut lines = vec![
        format!("**Total Complete Songs: {}**", complete.len()),
        format!("**Total Sessions: {}**", sessions.len()),
        String::new(),
    ];

    let timeline = EraTimeline::new(&catalog.milestones, *config);
    for bucket in timeline.partition(complete.iter().copied()) {
        lines.push(format!("# {}", bucket.name));
        for (n, work) in bucket.works.iter().enumerate() {
            let mut parts = vec![format!("{}. **{}**", n + 1, work.title)];
            if let Some(producer) = work.producer.as_deref().filter(|p| !p.is_empty()) {
                parts.push(format!("`prod. {producer}`"));
            }
            parts.push(format!("({})", display_date(work)));
            if let Some(name) = milestone_names.get(&work.id) {
                parts.push(format!("[{name}]"));
            }
            if with_session.contains(&work.id) {
                parts.push("[+ Session]".to_string());
            }
            lines.push(parts.join(" "));
        }
        lines.push(String::new());
    }

    lines.join("\n").trim().to_string()
}

/// Raw dump of every full work and every session take, lyrics included, in
/// catalog order.
pub fn lyrics_backup(catalog: &Catalog) -> String {
    let entries = catalog
        .works
        .iter()
        .filter(|w| w.category == Category::Full || w.is_session());

    let mut lines = Vec::new();
    for (n, work) in entries.enumerate() {
        lines.push(format!("{}.", n + 1));
        lines.push(format!("Title: {}", work.title));
        lines.push(format!("Date: {}", display_date(work)));
        let category = match work.sub_category.as_str() {
            "" => work.category.to_string(),
            sub => sub.to_string(),
        };
        lines.push(format!("Category: {category}"));
        if let Some(parent) = work.parent_id {
            lines.push(format!("Parent ID: {parent}"));
        }
        lines.push("-".to_string());
        let lyrics = work.lyrics.as_deref().filter(|l| !l.is_empty());
        lines.push(lyrics.unwrap_or("[No Lyrics]").to_string());
        lines.push(String::new());
        lines.push(ENTRY_SEPARATOR.to_string());
        lines.push(String::new());
    }

    lines.join("\n").trim().to_string()
}
