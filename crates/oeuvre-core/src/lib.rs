//! Core domain model for oeuvre.
//!
//! This crate defines the catalog data model (works, milestones and their
//! track associations), the era classifier and partitioner, display-image
//! resolution, the archive grouping tree and the navigation controller that
//! browses it. Everything here is a pure computation over in-memory
//! snapshots; loading and validating those snapshots lives in
//! `oeuvre-store`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod browse;
pub mod era;
pub mod error;
pub mod image;
pub mod model;
pub mod report;

pub use browse::{ArchiveBrowser, GroupingTree, Layout, TreePath};
pub use era::{classify, partition, EraBucket, EraConfig};
pub use error::{Error, Result};
pub use image::{resolve_image, CoverIndex};
pub use model::{Catalog, Milestone, MilestoneTrack, Work};
