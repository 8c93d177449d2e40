use anyhow::Result;
use oeuvre_core::browse::{build_tree, TreeItem, TreeNode};
use oeuvre_core::CoverIndex;

use super::Workspace;

fn print_item(item: &TreeItem, depth: usize) {
    let indent = "  ".repeat(depth);
    match &item.display_image {
        Some(image) => println!("{indent}- {} ({}) [{image}]", item.title, item.display_date()),
        None => println!("{indent}- {} ({})", item.title, item.display_date()),
    }
}

fn print_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.date_range {
        Some(range) => println!("{indent}{} [{}] {range}", node.key, node.count),
        None => println!("{indent}{} [{}]", node.key, node.count),
    }
    for folder in node.folders() {
        print_node(folder, depth + 1);
    }
    for item in node.items() {
        print_item(item, depth + 1);
    }
}

/// Print the grouping tree, optionally filtered by a title search.
pub fn show_tree(ws: &Workspace, search: &str) -> Result<()> {
    let catalog = ws.browsed();
    let covers = CoverIndex::build(&catalog.milestone_tracks, &catalog.milestones);
    let tree = build_tree(
        &catalog.works,
        &catalog.milestones,
        &covers,
        search,
        &ws.eras,
    );

    if tree.is_empty() {
        if search.is_empty() {
            println!("No works in the catalog.");
        } else {
            println!("No works match '{search}'.");
        }
        return Ok(());
    }

    for era in &tree.eras {
        print_node(era, 0);
    }

    if !search.is_empty() {
        println!("\n{} matching works. Folders opened by the search:", tree.leaf_count());
        for path in &tree.forced_expansion {
            println!("  {path}");
        }
    }

    Ok(())
}
