//! The data-layer boundary for oeuvre.
//!
//! Loads layered configuration, reads catalog snapshots exported by the data
//! store and validates them before they reach the pure engine in
//! `oeuvre-core`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod snapshot;
pub mod validate;

pub use config::{Config, LoggingConfig};
pub use error::{StoreError, StoreResult};
pub use snapshot::{load_catalog, load_validated, parse_catalog};
pub use validate::{enforce, validate, Violation};
