use anyhow::{Context, Result};
use oeuvre_core::browse::{ArchiveQuery, SortOrder, DISPLAY_DATE_FORMAT};

use super::Workspace;

/// Build an archive query from the command-line flags.
pub fn build_query(status: &str, search: String, sort: &str, asc: bool) -> Result<ArchiveQuery> {
    Ok(ArchiveQuery {
        status: status.parse().context("Invalid --status")?,
        search,
        sort_field: sort.parse().context("Invalid --sort")?,
        sort_order: if asc { SortOrder::Asc } else { SortOrder::Desc },
    })
}

/// Print the flat archive listing.
pub fn show_archive(ws: &Workspace, query: &ArchiveQuery, json: bool) -> Result<()> {
    let catalog = ws.browsed();
    let listed = query.apply(&catalog.works);

    if json {
        let out = serde_json::to_string_pretty(&listed).context("Failed to serialize listing")?;
        println!("{out}");
        return Ok(());
    }

    if listed.is_empty() {
        println!("No works match.");
        return Ok(());
    }

    println!("{:<4} {:<40} {:<12} {:<12} Producer", "#", "Title", "Date", "Status");
    for (i, work) in listed.iter().enumerate() {
        let date = work
            .instant()
            .map_or_else(|| "-".to_string(), |d| d.format(DISPLAY_DATE_FORMAT).to_string());
        println!(
            "{:<4} {:<40} {:<12} {:<12} {}",
            i + 1,
            work.title,
            date,
            work.sub_category.as_str(),
            work.producer.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} works, sorted by {}", listed.len(), query.sort_field);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oeuvre_core::browse::{SortField, StatusFilter};
    use oeuvre_core::model::SubCategory;

    #[test]
    fn test_build_query_from_flags() {
        let query = build_query("demos", "night".to_string(), "title", true).unwrap();
        assert_eq!(query.status, StatusFilter::Only(SubCategory::Demos));
        assert_eq!(query.search, "night");
        assert_eq!(query.sort_field, SortField::Title);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_build_query_defaults_match_listing_defaults() {
        let query = build_query("all", String::new(), "date", false).unwrap();
        assert_eq!(query, ArchiveQuery::default());
    }

    #[test]
    fn test_build_query_rejects_unknown_sort() {
        assert!(build_query("all", String::new(), "length", false).is_err());
    }
}
