//! Config-tree fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use soav_core::ValidationReport;
use soav_engine::{ServiceValidator, SoaDirCatalog};
use soav_schema::StructuralValidator;
use tempfile::TempDir;

/// A temporary config root.
pub struct SoaTree {
    dir: TempDir,
}

impl SoaTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn service(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `rel` under the root, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn validator(&self) -> ServiceValidator<SoaDirCatalog> {
        ServiceValidator::new(SoaDirCatalog::new(), StructuralValidator::default())
    }

    /// Validate `service` by name.
    pub fn validate(&self, service: &str) -> ValidationReport {
        self.validator()
            .validate_service(Some(service), self.root(), self.root())
            .unwrap()
    }
}

pub fn lines(report: &ValidationReport) -> Vec<String> {
    report.diagnostics().iter().map(|d| d.to_string()).collect()
}

pub const PERIODIC_NAMESPACE: &str = r#"
jobs:
  - name: nightly_rollup
    node: batch_box
    schedule: "daily 04:00:00"
    actions:
      - name: extract
        command: ./extract.sh
      - name: load
        command: ./load.sh
        requires: [extract]
    cleanup_action:
      command: ./cleanup.sh
"#;
