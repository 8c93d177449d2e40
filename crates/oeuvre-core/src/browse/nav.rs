//! Navigation and search state for browsing the grouping tree.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::browse::tree::{build_tree, GroupingTree, TreeItem, TreeNode, TreePath};
use crate::era::EraConfig;
use crate::error::Error;
use crate::image::CoverIndex;
use crate::model::Catalog;

/// How the current listing is laid out. Has no effect on grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    List,
    Grid,
}

impl Layout {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Grid => f.write_str("grid"),
        }
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "grid" => Ok(Self::Grid),
            other => Err(Error::InvalidData(format!(
                "unknown layout '{other}' (expected list or grid)"
            ))),
        }
    }
}

/// One row of the current listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleEntry<'a> {
    Folder(&'a TreeNode),
    Item(&'a TreeItem),
}

/// Browses one catalog snapshot: current path, search query, layout and
/// expansion state, with the tree rebuilt whenever the query or snapshot
/// changes.
#[derive(Debug)]
pub struct ArchiveBrowser {
    catalog: Catalog,
    config: EraConfig,
    covers: CoverIndex,
    tree: GroupingTree,
    path: TreePath,
    query: String,
    layout: Layout,
    manual_expansion: BTreeSet<TreePath>,
    /// Expansion while a search is active, seeded from the forced paths.
    search_expansion: Option<BTreeSet<TreePath>>,
}

impl ArchiveBrowser {
    /// Start at the root with no query.
    ///
    /// `catalog` should already be restricted to the category being browsed.
    pub fn new(catalog: Catalog, config: EraConfig) -> Self {
        let covers = CoverIndex::build(&catalog.milestone_tracks, &catalog.milestones);
        let tree = build_tree(&catalog.works, &catalog.milestones, &covers, "", &config);
        Self {
            catalog,
            config,
            covers,
            tree,
            path: TreePath::root(),
            query: String::new(),
            layout: Layout::default(),
            manual_expansion: BTreeSet::new(),
            search_expansion: None,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tree(&self) -> &GroupingTree {
        &self.tree
    }

    pub fn path(&self) -> &TreePath {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Descend into the child folder `key` of the current folder.
    ///
    /// Returns `false`, leaving the path alone, when there is no such folder.
    pub fn enter(&mut self, key: &str) -> bool {
        let exists = match self.current_node() {
            None => self.tree.era(key).is_some(),
            Some(node) => node.child(key).is_some(),
        };
        if exists {
            self.path.push(key.to_string());
        }
        exists
    }

    /// Go up one level. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Breadcrumb jump: keep the first `index` keys of the path.
    pub fn go_to(&mut self, index: usize) {
        self.path.truncate(index);
    }

    /// Replace the search query and rebuild the tree.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.rebuild();
        self.search_expansion = self
            .is_searching()
            .then(|| self.tree.forced_expansion.clone());
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled();
    }

    /// Swap in a new snapshot, keeping path, query, layout and expansion.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.covers = CoverIndex::build(&catalog.milestone_tracks, &catalog.milestones);
        self.catalog = catalog;
        self.rebuild();
        if self.is_searching() {
            self.search_expansion = Some(self.tree.forced_expansion.clone());
        }
    }

    /// Open or close a folder. While searching this edits the search
    /// expansion, leaving the manual one for when the query is cleared.
    pub fn toggle_expanded(&mut self, path: TreePath) {
        let set = match self.search_expansion.as_mut() {
            Some(set) => set,
            None => &mut self.manual_expansion,
        };
        if !set.remove(&path) {
            set.insert(path);
        }
    }

    /// The expansion set currently in effect.
    pub fn expanded(&self) -> &BTreeSet<TreePath> {
        self.search_expansion
            .as_ref()
            .unwrap_or(&self.manual_expansion)
    }

    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expanded().contains(path)
    }

    /// The folder the path points at, `None` at the root.
    pub fn current_node(&self) -> Option<&TreeNode> {
        self.tree.node_at(&self.path)
    }

    /// The listing for the current path.
    pub fn visible_nodes(&self) -> Vec<VisibleEntry<'_>> {
        match self.current_node() {
            None => self.tree.eras.iter().map(VisibleEntry::Folder).collect(),
            Some(node) => {
                let folders = node.folders().iter().map(VisibleEntry::Folder);
                let items = node.items().iter().map(VisibleEntry::Item);
                folders.chain(items).collect()
            }
        }
    }

    /// Labels for a breadcrumb bar, starting with the root.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        std::iter::once("Archive")
            .chain(self.path.keys().iter().map(String::as_str))
            .collect()
    }

    fn rebuild(&mut self) {
        self.tree = build_tree(
            &self.catalog.works,
            &self.catalog.milestones,
            &self.covers,
            &self.query,
            &self.config,
        );
        let depth = self.tree.valid_depth(&self.path);
        if depth < self.path.depth() {
            log::debug!(
                "Path {} no longer resolves; clamping to depth {}",
                self.path,
                depth
            );
            self.path.truncate(depth);
        }
    }
}
