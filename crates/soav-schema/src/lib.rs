//! # soav-schema: Schema Registry & Structural Validation
//!
//! ## Registry (`registry`)
//!
//! One JSON Schema per scheduler type, bundled into the binary from
//! `schemas/v1/`. Parsed lazily on first use and never mutated afterwards.
//! An unknown scheduler identifier yields `None`, not an error.
//!
//! ## Structural Validation (`validate`)
//!
//! [`StructuralValidator`] parses a config file as YAML or JSON (chosen by
//! extension), validates it against the scheduler's schema, and reports one
//! diagnostic per violation. Validator messages are passed through verbatim.
//!
//! ## Schema Audit (`audit`)
//!
//! Every object in a bundled schema must forbid unknown keys. The audit
//! walks a schema and reports objects that leave `additionalProperties` open.
//!
//! ## Crate Policy
//!
//! - Depends only on `soav-core` internally.
//! - No network access: schema `$ref`s resolve inside the bundle or fail.

pub mod audit;
pub mod registry;
pub mod validate;

pub use audit::{audit_additional_properties, AdditionalPropertiesFinding};
pub use registry::{get_schema, schema_for, schema_resource_name, SCHEMA_VERSION};
pub use validate::{
    DocumentFormat, RawConfigDocument, SchemaError, StructuralValidator, UnknownSchemaPolicy,
    Violation,
};
