pub mod archive;
pub mod config;
pub mod eras;
pub mod milestones;
pub mod report;
pub mod tree;

use std::path::PathBuf;

use anyhow::{Context, Result};
use oeuvre_core::model::Category;
use oeuvre_core::{Catalog, EraConfig};
use oeuvre_store::Config;

/// The `--category` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryArg {
    Full,
    Written,
    All,
}

impl CategoryArg {
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Full => Some(Category::Full),
            Self::Written => Some(Category::Written),
            Self::All => None,
        }
    }
}

/// A loaded snapshot plus the settings every command needs.
#[derive(Debug)]
pub struct Workspace {
    /// The whole snapshot, as exported.
    pub catalog: Catalog,
    pub category: Option<Category>,
    pub eras: EraConfig,
    pub source: PathBuf,
    pub lenient: bool,
}

impl Workspace {
    /// Load and validate the configured snapshot.
    pub fn open(config: &Config, category: CategoryArg, lenient: bool) -> Result<Self> {
        let eras = config
            .era_config()
            .context("Invalid era bounds in configuration")?;
        let source = config.catalog_path.clone();
        let catalog = load(&source, lenient)?;
        Ok(Self {
            catalog,
            category: category.category(),
            eras,
            source,
            lenient,
        })
    }

    /// Read the snapshot again, restricted to the chosen category.
    pub fn reload(&self) -> Result<Catalog> {
        let catalog = load(&self.source, self.lenient)?;
        Ok(restrict(catalog, self.category))
    }

    /// The snapshot restricted to the chosen category.
    pub fn browsed(&self) -> Catalog {
        restrict(self.catalog.clone(), self.category)
    }
}

fn load(path: &std::path::Path, lenient: bool) -> Result<Catalog> {
    oeuvre_store::load_validated(path, lenient)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}

fn restrict(catalog: Catalog, category: Option<Category>) -> Catalog {
    match category {
        Some(category) => catalog.with_category(category),
        None => catalog,
    }
}
