use anyhow::Result;
use oeuvre_core::browse::DISPLAY_DATE_FORMAT;
use oeuvre_core::era::{EraTimeline, EARLY_ERA};

use super::Workspace;

fn category_label(ws: &Workspace) -> String {
    ws.category
        .map_or_else(|| "all works".to_string(), |c| format!("{c} works"))
}

/// Describe the time span an era covers.
fn span_of(timeline: &EraTimeline, era: &str) -> Option<String> {
    if era == EARLY_ERA {
        let cutoff = timeline.config().early_cutoff.format(DISPLAY_DATE_FORMAT);
        return Some(format!("through {cutoff}"));
    }
    let span = timeline.spans().iter().find(|s| s.label == era)?;
    let start = span.start.format(DISPLAY_DATE_FORMAT);
    Some(match span.end {
        Some(end) => format!("{start} until {}", end.format(DISPLAY_DATE_FORMAT)),
        None => format!("from {start}"),
    })
}

/// List the non-empty eras in chronological order.
pub fn show_eras(ws: &Workspace) -> Result<()> {
    let catalog = ws.browsed();
    let timeline = EraTimeline::new(&catalog.milestones, ws.eras);
    let buckets = timeline.partition(&catalog.works);

    println!("\nEras ({})\n", category_label(ws));

    if buckets.is_empty() {
        println!("  No works in the catalog.");
        return Ok(());
    }

    for bucket in &buckets {
        let span = span_of(&timeline, &bucket.name).unwrap_or_default();
        println!("  {:<28} {:>5}   {}", bucket.name, bucket.len(), span);
    }
    println!("\n  Total: {} works", catalog.works.len());

    Ok(())
}

/// Print the era of every work matching `query`.
pub fn show_era(ws: &Workspace, query: &str) -> Result<()> {
    let timeline = EraTimeline::new(&ws.catalog.milestones, ws.eras);
    for work in ws.catalog.find_works(query)? {
        let date = work
            .instant()
            .map_or_else(|| "Unknown Date".to_string(), |i| i.format(DISPLAY_DATE_FORMAT).to_string());
        println!("{} ({}, {}): {}", work.title, work.id, date, timeline.classify(work));
    }
    Ok(())
}
