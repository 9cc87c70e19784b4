//! # Service Path Resolution
//!
//! Lookups only. Nothing here creates or modifies a directory.

use std::path::{Path, PathBuf};

use soav_core::messages::{no_config_files, not_a_directory, UNKNOWN_SERVICE};
use soav_core::ValidationReport;

/// Resolve the directory holding a service's config files.
///
/// With no `service`, the working directory `cwd` is used if it holds at
/// least one `.yaml` file. With a `service`, `soa_dir/service` is used if it
/// is a directory. Otherwise the unknown-service help is added to `report`
/// and `None` is returned.
pub fn resolve_service_path(
    service: Option<&str>,
    soa_dir: &Path,
    cwd: &Path,
    report: &mut ValidationReport,
) -> Option<PathBuf> {
    let candidate = match service {
        Some(service) => {
            let path = soa_dir.join(service);
            path.is_dir().then_some(path)
        }
        None => (!config_files(cwd).is_empty()).then(|| cwd.to_path_buf()),
    };
    if candidate.is_none() {
        report.fail(UNKNOWN_SERVICE);
    }
    candidate
}

/// Check that `path` is a directory with at least one `.yaml` file.
pub fn check_service_path(path: Option<&Path>, report: &mut ValidationReport) -> bool {
    let Some(path) = path.filter(|p| p.is_dir()) else {
        report.fail(not_a_directory(path));
        return false;
    };
    if config_files(path).is_empty() {
        report.fail(no_config_files(path));
        return false;
    }
    true
}

/// Split a service path into `(soa_dir, service)`.
///
/// A path without a final component (`.`, `..`) is canonicalized first.
pub fn soa_dir_and_service(service_path: &Path) -> (PathBuf, String) {
    let resolved = match service_path.file_name() {
        Some(_) => service_path.to_path_buf(),
        None => service_path
            .canonicalize()
            .unwrap_or_else(|_| service_path.to_path_buf()),
    };
    let service = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let soa_dir = resolved
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    (soa_dir, service)
}

/// `*.yaml` files directly inside `dir`, sorted. Unreadable directories have
/// none.
pub fn config_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    files.sort();
    files
}
