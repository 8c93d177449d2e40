use anyhow::Result;
use oeuvre_core::browse::DISPLAY_DATE_FORMAT;
use oeuvre_core::{Catalog, Milestone};

use super::Workspace;

fn release_date(milestone: &Milestone) -> String {
    milestone
        .release_date
        .map_or_else(|| "undated".to_string(), |d| d.format(DISPLAY_DATE_FORMAT).to_string())
}

/// What a milestone means for era boundaries.
fn era_role(catalog: &Catalog, milestone: &Milestone) -> String {
    if milestone.is_standard() {
        return if milestone.release_date.is_some() {
            format!("opens {}", milestone.era_label())
        } else {
            "opens no era (undated)".to_string()
        };
    }
    match catalog.origin_of(milestone) {
        Some(origin) => format!("{} edition of {}", milestone.kind, origin.name),
        None => format!("{} edition", milestone.kind),
    }
}

/// List every milestone, oldest release first.
pub fn show_milestones(ws: &Workspace) -> Result<()> {
    let catalog = &ws.catalog;
    if catalog.milestones.is_empty() {
        println!("No milestones in the catalog.");
        return Ok(());
    }

    let mut milestones: Vec<&Milestone> = catalog.milestones.iter().collect();
    milestones.sort_by_key(|m| (m.release_date.is_none(), m.release_date));

    println!("\nMilestones\n");
    for milestone in milestones {
        println!(
            "  {:<32} {:<10} {:>3} tracks   {}",
            milestone.name,
            release_date(milestone),
            catalog.tracklist(milestone.id).len(),
            era_role(catalog, milestone)
        );
    }

    Ok(())
}

/// Show one milestone with its editions and tracklist.
pub fn show_milestone(ws: &Workspace, query: &str) -> Result<()> {
    let catalog = &ws.catalog;
    let milestone = catalog.find_milestone(query)?;

    println!("\n{}\n", milestone.name);
    println!("  Released: {}", release_date(milestone));
    println!("  Type:     {}", milestone.kind);
    println!("  Era role: {}", era_role(catalog, milestone));
    if let Some(cover) = milestone.cover() {
        println!("  Cover:    {cover}");
    }

    let editions = catalog.editions_of(milestone.id);
    if !editions.is_empty() {
        println!("\n  Editions:");
        for edition in editions {
            println!("    {} ({}, {})", edition.name, edition.kind, release_date(edition));
        }
    }

    let tracks = catalog.tracklist(milestone.id);
    println!("\n  Tracklist:");
    if tracks.is_empty() {
        println!("    (empty)");
    }
    for (position, work) in tracks {
        println!("    {position:>2}. {}", work.title);
    }

    Ok(())
}
