//! # Validation Orchestrator
//!
//! One validation pass over a service: resolve the service directory, check
//! it holds config, then run the schema pass, the dependency-batch checks
//! and the periodic-batch checks. The three always run; the pass is valid
//! only if all three are.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use soav_core::{SchedulerType, ValidationReport};
use soav_schema::StructuralValidator;

use crate::batch::validate_batch_cluster;
use crate::catalog::Catalog;
use crate::dependency::validate_dependency_batch;
use crate::error::EngineError;
use crate::paths::{check_service_path, config_files, resolve_service_path};

/// Result of the schema pass over one service directory.
#[derive(Debug, Default)]
pub struct SchemaPass {
    /// One structural report per checked file, merged in file order.
    pub report: ValidationReport,
    /// Structural outcome per checked file.
    pub outcomes: BTreeMap<PathBuf, bool>,
}

/// Validates services against a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct ServiceValidator<C> {
    catalog: C,
    structural: StructuralValidator,
}

impl<C: Catalog> ServiceValidator<C> {
    /// Create a validator over `catalog`, checking structure with `structural`.
    pub fn new(catalog: C, structural: StructuralValidator) -> Self {
        Self {
            catalog,
            structural,
        }
    }

    /// The catalog the validators query.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Resolve `service` (or the working directory `cwd`) and validate it.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures; see [`ServiceValidator::validate_service_path`].
    pub fn validate_service(
        &self,
        service: Option<&str>,
        soa_dir: &Path,
        cwd: &Path,
    ) -> Result<ValidationReport, EngineError> {
        let mut report = ValidationReport::new();
        let Some(path) = resolve_service_path(service, soa_dir, cwd, &mut report) else {
            return Ok(report);
        };
        tracing::info!(path = %path.display(), "validating service");
        report.merge(self.validate_service_path(&path)?);
        Ok(report)
    }

    /// Validate everything under one service directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the catalog cannot enumerate clusters or
    /// instances. Problems in config files are report lines.
    pub fn validate_service_path(&self, path: &Path) -> Result<ValidationReport, EngineError> {
        let mut report = ValidationReport::new();
        if !check_service_path(Some(path), &mut report) {
            return Ok(report);
        }

        let schemas = self.validate_all_schemas(path);
        let dependency = validate_dependency_batch(&self.catalog, path)?;
        let batch =
            validate_batch_cluster(&self.catalog, &self.structural, path, Some(&schemas.outcomes))?;

        report.merge(schemas.report);
        report.merge(dependency);
        report.merge(batch);
        Ok(report)
    }

    /// Structurally validate every `*.yaml` file in `path` whose name starts
    /// with a scheduler identifier. Symlinks are skipped.
    pub fn validate_all_schemas(&self, path: &Path) -> SchemaPass {
        let mut pass = SchemaPass::default();
        for file in config_files(path) {
            let is_symlink = std::fs::symlink_metadata(&file)
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false);
            if is_symlink {
                tracing::debug!(file = %file.display(), "skipping symlink");
                continue;
            }
            let Some(scheduler) = file
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(SchedulerType::for_file_name)
            else {
                continue;
            };
            tracing::debug!(file = %file.display(), %scheduler, "validating schema");
            let report = self.structural.validate_file(&file, scheduler.as_str());
            pass.outcomes.insert(file, report.is_valid());
            pass.report.merge(report);
        }
        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeCatalog, FakeJob};

    fn service_dir() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let web = root.path().join("web");
        std::fs::create_dir(&web).unwrap();
        std::fs::write(web.join("instant-dispatch-dev.yaml"), "main:\n  cpus: 1\n").unwrap();
        std::fs::write(web.join("service.yaml"), "description: x\n").unwrap();
        root
    }

    #[test]
    fn schema_pass_only_checks_scheduler_files() {
        let root = service_dir();
        let validator = ServiceValidator::new(FakeCatalog::default(), StructuralValidator::default());
        let pass = validator.validate_all_schemas(&root.path().join("web"));
        assert!(pass.report.is_valid(), "{}", pass.report);
        assert_eq!(pass.outcomes.len(), 1);
        assert_eq!(
            pass.report.to_string(),
            "✓ Successfully validated schema: instant-dispatch-dev.yaml"
        );
    }

    #[cfg(unix)]
    #[test]
    fn schema_pass_skips_symlinks() {
        let root = service_dir();
        let web = root.path().join("web");
        std::os::unix::fs::symlink(
            web.join("instant-dispatch-dev.yaml"),
            web.join("instant-dispatch-prod.yaml"),
        )
        .unwrap();
        let validator = ServiceValidator::new(FakeCatalog::default(), StructuralValidator::default());
        assert_eq!(validator.validate_all_schemas(&web).outcomes.len(), 1);
    }

    #[test]
    fn all_three_validators_run_and_are_anded() {
        let root = service_dir();
        let web = root.path().join("web");
        std::fs::write(web.join("instant-dispatch-prod.yaml"), "BAD_NAME: {}\n").unwrap();
        let catalog =
            FakeCatalog::default().job("dev", "web", "loop", FakeJob::with_parents(&["web.loop"]));
        let validator = ServiceValidator::new(catalog, StructuralValidator::default());

        let report = validator.validate_service_path(&web).unwrap();
        assert!(!report.is_valid());
        assert!(report.contains("Failed to validate schema"));
        assert!(report.contains("Job web.loop cannot depend on itself"));
    }

    #[test]
    fn empty_directory_short_circuits() {
        let root = tempfile::tempdir().unwrap();
        let catalog = FakeCatalog {
            broken: true,
            ..FakeCatalog::default()
        };
        let validator = ServiceValidator::new(catalog, StructuralValidator::default());
        let report = validator.validate_service_path(root.path()).unwrap();
        assert!(!report.is_valid());
        assert!(report.contains("does not contain any .yaml files"));
        assert_eq!(validator.catalog().calls.get(), 0);
    }

    #[test]
    fn unknown_service_fails_cleanly() {
        let root = service_dir();
        let validator = ServiceValidator::new(FakeCatalog::default(), StructuralValidator::default());
        let report = validator
            .validate_service(Some("ghost"), root.path(), root.path())
            .unwrap();
        assert!(!report.is_valid());
        assert!(report.contains("Unable to determine service to validate"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let root = service_dir();
        let catalog = FakeCatalog::default()
            .job("dev", "web", "a", FakeJob::default())
            .job("dev", "web", "b", FakeJob::with_parents(&["x.y"]));
        let validator = ServiceValidator::new(catalog, StructuralValidator::default());
        let first = validator.validate_service(Some("web"), root.path(), root.path()).unwrap();
        let second = validator.validate_service(Some("web"), root.path(), root.path()).unwrap();
        assert_eq!(first, second);
        assert!(!first.is_valid());
    }
}
