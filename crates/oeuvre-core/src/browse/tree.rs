//! The archive grouping tree: era / status / session group / item.
//!
//! Eras are listed by label so folder listings stay stable; the chronological
//! ordering lives in [`crate::era::partition`]. A search query drops
//! non-matching works before grouping, so every folder that survives has at
//! least one leaf.

use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::browse::session::base_title;
use crate::era::{EraConfig, EraTimeline};
use crate::image::{resolve_image, CoverIndex};
use crate::model::{Milestone, SubCategory, Work, WorkId};

/// Display format for dates in listings and reports.
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Which level of the tree a folder sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Era,
    Status,
    SessionGroup,
}

/// The fixed status folders of an era, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Released,
    Unreleased,
    Sessions,
}

impl StatusBucket {
    pub const ALL: [Self; 3] = [Self::Released, Self::Unreleased, Self::Sessions];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Released => "Released",
            Self::Unreleased => "Unreleased",
            Self::Sessions => "Sessions",
        }
    }

    pub fn of(work: &Work) -> Self {
        if work.is_session() {
            Self::Sessions
        } else if work.is_released() {
            Self::Released
        } else {
            Self::Unreleased
        }
    }
}

/// Inclusive span of the dated leaves under a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    fn of<'a>(instants: impl IntoIterator<Item = &'a Option<NaiveDateTime>>) -> Option<Self> {
        let mut range: Option<Self> = None;
        for instant in instants.into_iter().flatten() {
            range = Some(match range {
                None => Self {
                    start: *instant,
                    end: *instant,
                },
                Some(r) => Self {
                    start: r.start.min(*instant),
                    end: r.end.max(*instant),
                },
            });
        }
        range
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.format(DISPLAY_DATE_FORMAT);
        if self.start.date() == self.end.date() {
            write!(f, "{start}")
        } else {
            write!(f, "{start} - {}", self.end.format(DISPLAY_DATE_FORMAT))
        }
    }
}

/// A work as it appears in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub work_id: WorkId,
    pub title: String,
    pub instant: Option<NaiveDateTime>,
    pub display_image: Option<String>,
    pub sub_category: SubCategory,
    pub parent_id: Option<WorkId>,
}

impl TreeItem {
    fn new(work: &Work, covers: &CoverIndex) -> Self {
        Self {
            work_id: work.id,
            title: work.title.clone(),
            instant: work.instant(),
            display_image: resolve_image(work, covers).map(str::to_string),
            sub_category: work.sub_category.clone(),
            parent_id: work.parent_id,
        }
    }

    pub fn display_date(&self) -> String {
        self.instant
            .map(|i| i.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "Unknown Date".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    Folders(Vec<TreeNode>),
    Items(Vec<TreeItem>),
}

/// A folder in the grouping tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub key: String,
    pub kind: NodeKind,
    /// Number of leaves anywhere below this folder.
    pub count: usize,
    /// Span of the dated leaves below; `None` when none is dated.
    pub date_range: Option<DateRange>,
    pub children: Children,
}

impl TreeNode {
    fn with_items(key: String, kind: NodeKind, items: Vec<TreeItem>) -> Self {
        Self {
            key,
            kind,
            count: items.len(),
            date_range: DateRange::of(items.iter().map(|i| &i.instant)),
            children: Children::Items(items),
        }
    }

    fn with_folders(key: String, kind: NodeKind, folders: Vec<TreeNode>) -> Self {
        let count = folders.iter().map(|f| f.count).sum();
        let date_range = folders
            .iter()
            .filter_map(|f| f.date_range)
            .reduce(|a, b| DateRange {
                start: a.start.min(b.start),
                end: a.end.max(b.end),
            });
        Self {
            key,
            kind,
            count,
            date_range,
            children: Children::Folders(folders),
        }
    }

    /// Sub-folders, empty for folders that hold items.
    pub fn folders(&self) -> &[TreeNode] {
        match &self.children {
            Children::Folders(folders) => folders,
            Children::Items(_) => &[],
        }
    }

    /// Items, empty for folders that hold sub-folders.
    pub fn items(&self) -> &[TreeItem] {
        match &self.children {
            Children::Items(items) => items,
            Children::Folders(_) => &[],
        }
    }

    pub fn child(&self, key: &str) -> Option<&TreeNode> {
        self.folders().iter().find(|f| f.key == key)
    }

    /// Every leaf under this folder, depth first.
    pub fn leaves(&self) -> Vec<&TreeItem> {
        match &self.children {
            Children::Items(items) => items.iter().collect(),
            Children::Folders(folders) => folders.iter().flat_map(TreeNode::leaves).collect(),
        }
    }
}

/// A sequence of folder keys from the root; the empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreePath(Vec<String>);

impl TreePath {
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        Self(keys)
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, key: String) {
        self.0.push(key);
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0.join(" / "))
        }
    }
}

/// The built tree plus the folders a search forces open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingTree {
    pub eras: Vec<TreeNode>,
    pub query: String,
    /// Paths to open so every matching leaf is visible; empty without a query.
    pub forced_expansion: BTreeSet<TreePath>,
}

impl GroupingTree {
    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.eras.iter().map(|e| e.count).sum()
    }

    pub fn leaves(&self) -> Vec<&TreeItem> {
        self.eras.iter().flat_map(TreeNode::leaves).collect()
    }

    pub fn era(&self, key: &str) -> Option<&TreeNode> {
        self.eras.iter().find(|e| e.key == key)
    }

    /// The folder at `path`, or `None` for the root and for paths that do not
    /// resolve.
    pub fn node_at(&self, path: &TreePath) -> Option<&TreeNode> {
        let (first, rest) = path.keys().split_first()?;
        let mut node = self.era(first)?;
        for key in rest {
            node = node.child(key)?;
        }
        Some(node)
    }

    /// Length of the longest prefix of `path` that still resolves.
    pub fn valid_depth(&self, path: &TreePath) -> usize {
        let mut folders: &[TreeNode] = &self.eras;
        for (depth, key) in path.keys().iter().enumerate() {
            match folders.iter().find(|f| &f.key == key) {
                Some(node) => folders = node.folders(),
                None => return depth,
            }
        }
        path.depth()
    }
}

/// Newest first; undated after every dated one.
fn newest_first(a: &TreeItem, b: &TreeItem) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a.instant, b.instant) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn leaf_folder(key: String, kind: NodeKind, works: &[&Work], covers: &CoverIndex) -> TreeNode {
    let mut items: Vec<TreeItem> = works.iter().map(|w| TreeItem::new(w, covers)).collect();
    items.sort_by(newest_first);
    TreeNode::with_items(key, kind, items)
}

fn status_folder(bucket: StatusBucket, works: &[&Work], covers: &CoverIndex) -> TreeNode {
    if bucket != StatusBucket::Sessions {
        return leaf_folder(bucket.key().to_string(), NodeKind::Status, works, covers);
    }
    let mut groups: BTreeMap<String, Vec<&Work>> = BTreeMap::new();
    for work in works {
        groups.entry(base_title(&work.title)).or_default().push(work);
    }
    let folders = groups
        .into_iter()
        .map(|(key, takes)| leaf_folder(key, NodeKind::SessionGroup, &takes, covers))
        .collect();
    TreeNode::with_folders(bucket.key().to_string(), NodeKind::Status, folders)
}

/// Build the grouping tree.
///
/// `works` should already be restricted to the category being browsed. An
/// empty `query` keeps every work; otherwise only works whose title contains
/// it, ignoring case, are grouped.
pub fn build_tree(
    works: &[Work],
    milestones: &[Milestone],
    covers: &CoverIndex,
    query: &str,
    config: &EraConfig,
) -> GroupingTree {
    let needle = query.to_lowercase();
    let timeline = EraTimeline::new(milestones, *config);
    let buckets = timeline.partition(works.iter().filter(|w| w.title_contains(&needle)));

    let mut eras: Vec<TreeNode> = buckets
        .into_iter()
        .map(|bucket| {
            let statuses = StatusBucket::ALL
                .iter()
                .filter_map(|status| {
                    let members: Vec<&Work> = bucket
                        .works
                        .iter()
                        .copied()
                        .filter(|w| StatusBucket::of(w) == *status)
                        .collect();
                    (!members.is_empty()).then(|| status_folder(*status, &members, covers))
                })
                .collect();
            TreeNode::with_folders(bucket.name, NodeKind::Era, statuses)
        })
        .collect();
    eras.sort_by(|a, b| a.key.cmp(&b.key));

    let forced_expansion = if query.is_empty() {
        BTreeSet::new()
    } else {
        forced_paths(&eras)
    };

    let tree = GroupingTree {
        eras,
        query: query.to_string(),
        forced_expansion,
    };
    log::debug!(
        "Built grouping tree: {} eras, {} leaves, query {:?}",
        tree.eras.len(),
        tree.leaf_count(),
        tree.query
    );
    tree
}

fn forced_paths(eras: &[TreeNode]) -> BTreeSet<TreePath> {
    fn walk(node: &TreeNode, path: TreePath, out: &mut BTreeSet<TreePath>) {
        for folder in node.folders() {
            walk(folder, path.child(folder.key.clone()), out);
        }
        out.insert(path);
    }

    let mut paths = BTreeSet::new();
    if !eras.is_empty() {
        paths.insert(TreePath::root());
    }
    for era in eras {
        walk(era, TreePath::root().child(era.key.clone()), &mut paths);
    }
    paths
}
