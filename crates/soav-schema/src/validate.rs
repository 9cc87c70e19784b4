//! # Structural Validation
//!
//! Validates one config file against the bundled schema for its scheduler
//! type (JSON Schema draft 7). The schemas express the structural rules:
//! unknown keys are rejected at every level, instance names must match
//! `^[a-z0-9_-]+$`, enumerated fields take only their listed values, and
//! `healthcheck_mode: cmd` requires a non-empty `healthcheck_cmd`.
//!
//! ## Output
//!
//! A [`ValidationReport`] with either a single [`SCHEMA_VALID`] line naming
//! the file, or one [`SCHEMA_INVALID`] line per violation. Parse errors and
//! validator messages are passed through as the underlying library wrote them.
//!
//! ## Unknown Scheduler Types
//!
//! With [`UnknownSchemaPolicy::Permissive`] (the default) a scheduler type
//! with no registered schema validates vacuously: there is nothing to check
//! against, so the file passes with a [`SCHEMA_NOT_FOUND`] note. This can
//! mask a typo in the scheduler name. [`UnknownSchemaPolicy::Strict`] turns
//! the same situation into a failure.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use soav_core::messages::{
    FAILED_READING_FILE, SCHEMA_ERROR, SCHEMA_INVALID, SCHEMA_NOT_FOUND, SCHEMA_VALID,
};
use soav_core::{SchedulerType, ValidationReport};
use thiserror::Error;

use crate::registry::{schema_for, schema_resource_name};

/// Refuses every external `$ref`. Bundled schemas only use internal
/// `#/definitions/...` references, so reaching this is a schema bug.
struct BundledOnlyRetriever;

impl Retrieve for BundledOnlyRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema reference is not bundled: {}", uri.as_str()).into())
    }
}

/// Error compiling a schema or loading a document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The compiled validator could not be built from the bundled schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Bundle-relative schema name.
        schema_name: String,
        /// Compiler message.
        reason: String,
    },

    /// The document could not be parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path of the document.
        path: String,
        /// Parser message.
        reason: String,
    },
}

/// A single schema violation.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Validator message, unmodified.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// What to do when no schema exists for the requested scheduler type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownSchemaPolicy {
    /// Pass the file with a note.
    #[default]
    Permissive,
    /// Fail the file.
    Strict,
}

/// Parser selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
    /// Anything else. Validated as a bare string, which no bundled schema accepts.
    Text,
}

impl DocumentFormat {
    /// Pick the parser for a path.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Text,
        }
    }
}

/// Unparsed content of one config file.
#[derive(Debug, Clone)]
pub struct RawConfigDocument {
    /// Where the content came from. Used for diagnostics and format detection.
    pub path: PathBuf,
    /// File content.
    pub content: String,
    /// Parser to use.
    pub format: DocumentFormat,
}

impl RawConfigDocument {
    /// Wrap content read from `path`, choosing the format from its extension.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self {
            path,
            content: content.into(),
            format,
        }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path, content))
    }

    /// Parse the content into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DocumentLoadError` carrying the parser message.
    pub fn parse(&self) -> Result<Value, SchemaError> {
        let load_error = |reason: String| SchemaError::DocumentLoadError {
            path: self.path.display().to_string(),
            reason,
        };
        match self.format {
            DocumentFormat::Yaml => {
                let yaml_value: serde_yaml::Value =
                    serde_yaml::from_str(&self.content).map_err(|e| load_error(e.to_string()))?;
                yaml_to_json_value(&yaml_value).map_err(load_error)
            }
            DocumentFormat::Json => {
                serde_json::from_str(&self.content).map_err(|e| load_error(e.to_string()))
            }
            DocumentFormat::Text => Ok(Value::String(self.content.clone())),
        }
    }
}

/// Validates config documents against the bundled schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator {
    policy: UnknownSchemaPolicy,
}

impl StructuralValidator {
    /// Create a validator with the given unknown-schema policy.
    pub fn new(policy: UnknownSchemaPolicy) -> Self {
        Self { policy }
    }

    /// The unknown-schema policy in effect.
    pub fn policy(&self) -> UnknownSchemaPolicy {
        self.policy
    }

    /// Compile the bundled schema for a scheduler type.
    ///
    /// Returns `Ok(None)` when no schema is registered.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidatorBuildError` if the schema does not compile.
    pub fn build_validator(
        &self,
        scheduler: SchedulerType,
    ) -> Result<Option<Validator>, SchemaError> {
        let Some(schema) = schema_for(scheduler) else {
            return Ok(None);
        };
        jsonschema::options()
            .with_draft(Draft::Draft7)
            .with_retriever(BundledOnlyRetriever)
            .build(schema)
            .map(Some)
            .map_err(|e| SchemaError::ValidatorBuildError {
                schema_name: schema_resource_name(scheduler),
                reason: e.to_string(),
            })
    }

    /// Validate a parsed value, returning every violation.
    ///
    /// Returns `Ok(None)` when no schema is registered for `scheduler`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidatorBuildError` if the schema does not compile.
    pub fn validate_value(
        &self,
        instance: &Value,
        scheduler: SchedulerType,
    ) -> Result<Option<Vec<Violation>>, SchemaError> {
        let Some(validator) = self.build_validator(scheduler)? else {
            return Ok(None);
        };
        let violations = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        Ok(Some(violations))
    }

    /// Validate one document against the schema named by `scheduler`.
    ///
    /// `scheduler` is a raw identifier. An identifier outside the known set
    /// is handled according to the [`UnknownSchemaPolicy`].
    pub fn validate_structure(
        &self,
        document: &RawConfigDocument,
        scheduler: &str,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let path = document.path.display();

        let schema_type = scheduler
            .parse::<SchedulerType>()
            .ok()
            .filter(|s| schema_for(*s).is_some());
        let Some(schema_type) = schema_type else {
            match self.policy {
                UnknownSchemaPolicy::Permissive => {
                    tracing::debug!(%scheduler, "no schema registered; passing {path}");
                    report.info(format!("{SCHEMA_NOT_FOUND}: {path}"));
                }
                UnknownSchemaPolicy::Strict => {
                    report.fail(format!("{SCHEMA_NOT_FOUND}: {path}"));
                }
            }
            return report;
        };

        let instance = match document.parse() {
            Ok(value) => value,
            Err(SchemaError::DocumentLoadError { reason, .. }) => {
                report.fail(format!(
                    "{SCHEMA_INVALID}: {path}\n  Validation Message: {reason}"
                ));
                return report;
            }
            Err(other) => {
                report.fail(format!("{SCHEMA_ERROR}: {path}, error: {other}"));
                return report;
            }
        };

        match self.validate_value(&instance, schema_type) {
            Ok(Some(violations)) if violations.is_empty() => {
                let basename = document
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                report.pass(format!("{SCHEMA_VALID}: {basename}"));
            }
            Ok(Some(violations)) => {
                tracing::debug!(count = violations.len(), "schema violations in {path}");
                for violation in violations {
                    report.fail(format!(
                        "{SCHEMA_INVALID}: {path}\n  Validation Message: {violation}"
                    ));
                }
            }
            Ok(None) => report.info(format!("{SCHEMA_NOT_FOUND}: {path}")),
            Err(e) => report.fail(format!("{SCHEMA_ERROR}: {path}, error: {e}")),
        }
        report
    }

    /// Read `path` and validate it against the schema named by `scheduler`.
    ///
    /// An unreadable file is a structural failure.
    pub fn validate_file(&self, path: &Path, scheduler: &str) -> ValidationReport {
        match RawConfigDocument::read(path) {
            Ok(document) => self.validate_structure(&document, scheduler),
            Err(e) => {
                let mut report = ValidationReport::new();
                report.fail(format!("{FAILED_READING_FILE}: {}: {e}", path.display()));
                report
            }
        }
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Config files only use the JSON-compatible subset of YAML. Scalar map keys
/// are stringified so that an instance named `123` is checked against the
/// naming pattern like any other key.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
