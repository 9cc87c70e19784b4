//! # Error Types
//!
//! Errors raised by the collaborators the validators consume: the catalog of
//! clusters, services and instances, and the job-config loader.
//!
//! User mistakes in config files are never errors at this level; they become
//! diagnostics in a [`crate::ValidationReport`]. A `CatalogError` means the
//! catalog itself could not answer.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a catalog lookup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The requested service, instance, or file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A directory or file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be parsed.
    #[error("cannot parse {}: {reason}", path.display())]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

impl CatalogError {
    /// Returns true for the "not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
