//! # Engine Errors
//!
//! Infrastructure failures that abort a validation run. Everything else is
//! reported through a [`soav_core::ValidationReport`].

use std::path::PathBuf;

use soav_core::CatalogError;
use thiserror::Error;

/// A failure that prevents the validation run from completing.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The catalog could not enumerate clusters, services, or instances.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A directory that must be listed could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
