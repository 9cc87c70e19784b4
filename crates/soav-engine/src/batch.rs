//! # Periodic-Batch Validation
//!
//! Each periodic-batch namespace must pass the structural schema and the
//! scheduler's complete-config check. Two layouts are accepted:
//!
//! - **Direct cluster directory**: `<soa_dir>/periodic-batch/<cluster>/`,
//!   one `<service>.yaml` per service. Every file in the directory is checked.
//! - **Service root**: `<soa_dir>/<service>/`, one
//!   `periodic-batch-<cluster>.yaml` per cluster the service runs in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use soav_core::messages::{invalid_batch_namespace, valid_batch_namespace};
use soav_core::{SchedulerType, ValidationReport};
use soav_schema::StructuralValidator;

use crate::catalog::{Catalog, NamespaceLayout};
use crate::error::EngineError;
use crate::paths::soa_dir_and_service;

/// Validate every periodic-batch namespace reachable from `service_path`.
///
/// `known` carries structural outcomes the caller already computed, keyed by
/// file path. A file found there is not validated again.
///
/// # Errors
///
/// Fails when the direct cluster directory cannot be listed or the catalog
/// cannot answer.
pub fn validate_batch_cluster<C: Catalog>(
    catalog: &C,
    structural: &StructuralValidator,
    service_path: &Path,
    known: Option<&BTreeMap<PathBuf, bool>>,
) -> Result<ValidationReport, EngineError> {
    let (soa_dir, name) = soa_dir_and_service(service_path);
    let scheduler = SchedulerType::PeriodicBatch;
    let mut report = ValidationReport::new();

    if soa_dir.file_name().is_some_and(|n| n == scheduler.as_str()) {
        let cluster = name;
        let root = soa_dir.parent().map(Path::to_path_buf).unwrap_or_default();
        for file in list_files(service_path)? {
            let Some(service) = file.file_stem().map(|s| s.to_string_lossy().into_owned())
            else {
                continue;
            };
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let schema = structural.validate_file(&file, scheduler.as_str());
            let errors = catalog.complete_config_check(
                &root,
                &service,
                &cluster,
                NamespaceLayout::ClusterDir,
            )?;
            report.merge(namespace_report(
                &format!("{cluster}/{file_name}"),
                schema,
                &errors,
            ));
        }
    } else {
        for cluster in catalog.list_batch_clusters(&soa_dir, &name)? {
            let display = scheduler.config_file_name(&cluster);
            let file = service_path.join(&display);
            let schema = match known.and_then(|k| k.get(&file)) {
                Some(true) => ValidationReport::new(),
                Some(false) => {
                    let mut failed = ValidationReport::new();
                    failed.mark_failed();
                    failed
                }
                None => structural.validate_file(&file, scheduler.as_str()),
            };
            let errors = catalog.complete_config_check(
                &soa_dir,
                &name,
                &cluster,
                NamespaceLayout::ServiceDir,
            )?;
            report.merge(namespace_report(&display, schema, &errors));
        }
    }
    Ok(report)
}

fn namespace_report(display: &str, schema: ValidationReport, errors: &[String]) -> ValidationReport {
    let mut report = schema;
    if !errors.is_empty() {
        report.fail(invalid_batch_namespace(display, errors));
    } else if report.is_valid() {
        report.pass(valid_batch_namespace(display));
    }
    report
}

/// Regular files directly inside `dir`, sorted.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let entries = std::fs::read_dir(dir).map_err(|source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeCatalog;

    const VALID: &str = "jobs:\n  - name: j\n    node: batch\n    schedule: 'daily'\n    actions:\n      - name: a\n        command: run\n";
    const BAD_KEY: &str = "jobs:\n  - name: j\n    node: batch\n    schedule: 'daily'\n    surprise: 1\n";

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn lines(report: &ValidationReport) -> Vec<String> {
        report.diagnostics().iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn direct_directory_checks_every_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("periodic-batch").join("dev");
        write(&dir.join("api.yaml"), VALID);
        write(&dir.join("web.yaml"), VALID);

        let catalog = FakeCatalog::default();
        let report =
            validate_batch_cluster(&catalog, &StructuralValidator::default(), &dir, None).unwrap();
        assert!(report.is_valid(), "{report}");
        assert_eq!(
            lines(&report),
            [
                "✓ Successfully validated schema: api.yaml",
                "✓ dev/api.yaml is valid.",
                "✓ Successfully validated schema: web.yaml",
                "✓ dev/web.yaml is valid.",
            ]
        );
        assert_eq!(
            *catalog.layouts.borrow(),
            [NamespaceLayout::ClusterDir, NamespaceLayout::ClusterDir]
        );
    }

    #[test]
    fn direct_directory_reports_semantic_errors() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("periodic-batch").join("dev");
        write(&dir.join("web.yaml"), VALID);
        let mut catalog = FakeCatalog::default();
        catalog
            .batch_errors
            .insert("dev".into(), vec!["one".into(), "two".into()]);

        let report =
            validate_batch_cluster(&catalog, &StructuralValidator::default(), &dir, None).unwrap();
        assert!(!report.is_valid());
        assert!(report.contains("dev/web.yaml is invalid:\n  one\n  two"));
    }

    #[test]
    fn structural_failure_suppresses_the_valid_line() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("periodic-batch").join("dev");
        write(&dir.join("web.yaml"), BAD_KEY);

        let report = validate_batch_cluster(
            &FakeCatalog::default(),
            &StructuralValidator::default(),
            &dir,
            None,
        )
        .unwrap();
        assert!(!report.is_valid());
        assert!(report.contains("Failed to validate schema"));
        assert!(!report.contains("is valid."));
    }

    #[test]
    fn service_root_checks_each_cluster() {
        let root = tempfile::tempdir().unwrap();
        let service = root.path().join("web");
        write(&service.join("periodic-batch-dev.yaml"), VALID);
        write(&service.join("periodic-batch-prod.yaml"), BAD_KEY);
        let catalog = FakeCatalog {
            batch_clusters: vec!["dev".into(), "prod".into()],
            ..FakeCatalog::default()
        };

        let report =
            validate_batch_cluster(&catalog, &StructuralValidator::default(), &service, None)
                .unwrap();
        assert!(!report.is_valid());
        assert_eq!(
            *catalog.layouts.borrow(),
            [NamespaceLayout::ServiceDir, NamespaceLayout::ServiceDir]
        );
        assert!(report.contains("✓ periodic-batch-dev.yaml is valid."));
        assert!(!report.contains("periodic-batch-prod.yaml is valid."));
    }

    #[test]
    fn known_outcomes_are_reused() {
        let root = tempfile::tempdir().unwrap();
        let service = root.path().join("web");
        write(&service.join("periodic-batch-dev.yaml"), BAD_KEY);
        write(&service.join("periodic-batch-prod.yaml"), VALID);
        let catalog = FakeCatalog {
            batch_clusters: vec!["dev".into(), "prod".into()],
            ..FakeCatalog::default()
        };
        let known = BTreeMap::from([
            (service.join("periodic-batch-dev.yaml"), false),
            (service.join("periodic-batch-prod.yaml"), true),
        ]);

        let report = validate_batch_cluster(
            &catalog,
            &StructuralValidator::default(),
            &service,
            Some(&known),
        )
        .unwrap();
        assert!(!report.is_valid());
        assert_eq!(lines(&report), ["✓ periodic-batch-prod.yaml is valid."]);
    }

    #[test]
    fn missing_direct_directory_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("periodic-batch").join("absent");
        let err = validate_batch_cluster(
            &FakeCatalog::default(),
            &StructuralValidator::default(),
            &dir,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
