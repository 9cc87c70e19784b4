//! # soav-core: Foundational Types
//!
//! Shared vocabulary for every other soav crate. Depends on nothing internal.
//!
//! ## Key Types
//!
//! - [`SchedulerType`]: the closed set of scheduler backends, each with its
//!   own structural schema and per-cluster file naming convention.
//! - [`JobId`]: a structured `(service, instance)` pair. The `.` spacer only
//!   appears at the boundary where job identifiers are read from config.
//! - [`ValidationReport`]: ordered diagnostics plus an overall outcome. Every
//!   validator produces one; the orchestrator merges them.
//! - [`messages`]: the literal strings operators (and their tooling) grep for.
//!
//! ## Crate Policy
//!
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Diagnostic text is part of the public interface. Changing a marker in
//!   [`messages`] is a breaking change.

pub mod error;
pub mod identity;
pub mod messages;
pub mod report;
pub mod scheduler;

pub use error::CatalogError;
pub use identity::{JobId, INTERNAL_SPACER, TMP_JOB_IDENTIFIER};
pub use report::{Diagnostic, Status, ValidationReport};
pub use scheduler::{SchedulerType, UnknownSchedulerType};
