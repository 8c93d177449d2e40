//! Browsing the catalog.
//!
//! [`build_tree`] groups works into a three-level folder tree (era, release
//! status, session base title). [`ArchiveBrowser`] keeps the navigation
//! state over that tree, and [`ArchiveQuery`] drives the flat archive
//! listing.

pub mod archive;
pub mod nav;
pub mod session;
pub mod tree;

pub use archive::{ArchiveQuery, SortField, SortOrder, StatusFilter};
pub use nav::{ArchiveBrowser, Layout, VisibleEntry};
pub use session::{base_title, UNTITLED_SESSION};
pub use tree::{
    build_tree, Children, DateRange, GroupingTree, NodeKind, StatusBucket, TreeItem, TreeNode,
    TreePath, DISPLAY_DATE_FORMAT,
};
