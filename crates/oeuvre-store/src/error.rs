//! Error types for the store boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Violation;

/// Errors raised while loading or validating a catalog snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid catalog JSON.
    #[error("failed to parse catalog snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// The snapshot breaks one or more boundary rules.
    #[error("catalog snapshot has {} violation(s); first: {}", .0.len(), first_violation(.0))]
    Invalid(Vec<Violation>),

    /// An error propagated from the core domain layer.
    #[error("core error: {0}")]
    Core(#[from] oeuvre_core::Error),
}

fn first_violation(violations: &[Violation]) -> String {
    violations
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

impl StoreError {
    /// The violations behind an [`StoreError::Invalid`], empty otherwise.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

/// Convenience alias for store results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
