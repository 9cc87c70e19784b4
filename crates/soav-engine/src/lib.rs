//! # soav-engine: Service Config Validation
//!
//! Composes the structural validator from `soav-schema` with the semantic
//! checks that need a view of more than one file:
//!
//! - [`paths`]: locate the service directory and check it holds config.
//! - [`dependency`]: for the dependency-batch scheduler, per cluster: every
//!   job's parents must exist and a job may not depend on itself.
//! - [`batch`]: for the periodic-batch scheduler: structural plus
//!   complete-config checks per cluster namespace.
//! - [`orchestrator`]: runs all of the above for one service and ANDs the
//!   results.
//!
//! ## Collaborators
//!
//! Cluster and instance enumeration, job loading, and the complete-config
//! check are reached through the [`Catalog`] trait. [`SoaDirCatalog`] answers
//! them from a config root on disk.
//!
//! ## Crate Policy
//!
//! - Single-threaded and deterministic: directory listings are sorted, so
//!   two runs over the same tree print identical reports.
//! - Problems in config files become report lines. Only failures of the
//!   catalog itself surface as [`EngineError`].

pub mod batch;
pub mod catalog;
pub mod dependency;
pub mod error;
#[cfg(test)]
mod fake;
pub mod job;
pub mod namespace;
pub mod orchestrator;
pub mod paths;
pub mod soa_dir;

pub use batch::validate_batch_cluster;
pub use catalog::{Catalog, JobConfig, NamespaceLayout};
pub use dependency::{validate_dependency_batch, DependencyGraphView};
pub use error::EngineError;
pub use job::DependencyBatchJob;
pub use orchestrator::{SchemaPass, ServiceValidator};
pub use paths::{check_service_path, resolve_service_path, soa_dir_and_service};
pub use soa_dir::SoaDirCatalog;
