//! # Filesystem Catalog
//!
//! [`Catalog`] over a config root laid out as
//! `<soa_dir>/<service>/<scheduler>-<cluster>.yaml`. Each per-cluster file is
//! a mapping from instance name to instance block. Periodic-batch namespaces
//! may also live in a direct cluster directory,
//! `<soa_dir>/periodic-batch/<cluster>/<service>.yaml`.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use soav_core::{CatalogError, JobId, SchedulerType};

use crate::catalog::{Catalog, NamespaceLayout};
use crate::job::DependencyBatchJob;
use crate::namespace::check_namespace;

/// Reads clusters, services and instances straight from the config root.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoaDirCatalog;

impl SoaDirCatalog {
    /// Create a catalog. The config root is passed to each lookup.
    pub fn new() -> Self {
        Self
    }

    /// Sorted `(name, path)` of every service directory under `soa_dir`.
    fn service_dirs(soa_dir: &Path) -> Result<Vec<(String, PathBuf)>, CatalogError> {
        let entries = std::fs::read_dir(soa_dir).map_err(|source| CatalogError::Io {
            path: soa_dir.to_path_buf(),
            source,
        })?;
        let mut dirs: Vec<(String, PathBuf)> = entries
            .flatten()
            .filter(|e| e.path().is_dir())
            .filter_map(|e| {
                let name = e.file_name().to_str()?.to_string();
                Some((name, e.path()))
            })
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    /// Sorted file names directly inside `dir`. An unreadable directory is
    /// logged and treated as empty.
    fn file_names(dir: &Path) -> Vec<String> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return Vec::new();
            }
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// Instance blocks of one per-cluster file, in document order.
    ///
    /// A missing file has no instances.
    fn instance_blocks(path: &Path) -> Result<Vec<(String, serde_yaml::Value)>, CatalogError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let parsed: Option<serde_yaml::Mapping> =
            serde_yaml::from_str(&content).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(parsed
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, block)| match key {
                serde_yaml::Value::String(name) => Some((name, block)),
                serde_yaml::Value::Number(n) => Some((n.to_string(), block)),
                _ => None,
            })
            .collect())
    }

    /// Instance names of one per-cluster file, skipping `_` templates.
    ///
    /// A file that does not parse has already failed the structural pass, so
    /// it contributes no instances here.
    fn instance_names(path: &Path) -> Result<Vec<String>, CatalogError> {
        match Self::instance_blocks(path) {
            Ok(blocks) => Ok(blocks
                .into_iter()
                .map(|(name, _)| name)
                .filter(|name| !name.starts_with('_'))
                .collect()),
            Err(CatalogError::Parse { path, reason }) => {
                tracing::warn!(path = %path.display(), %reason, "unparseable config treated as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl Catalog for SoaDirCatalog {
    type Job = DependencyBatchJob;

    fn list_clusters(
        &self,
        soa_dir: &Path,
        scheduler: SchedulerType,
    ) -> Result<Vec<String>, CatalogError> {
        let mut clusters = BTreeSet::new();
        for (_, dir) in Self::service_dirs(soa_dir)? {
            for name in Self::file_names(&dir) {
                if let Some(cluster) = scheduler.cluster_from_file_name(&name) {
                    clusters.insert(cluster.to_string());
                }
            }
        }
        Ok(clusters.into_iter().collect())
    }

    fn list_instances_for_service(
        &self,
        soa_dir: &Path,
        service: &str,
        cluster: &str,
        scheduler: SchedulerType,
    ) -> Result<Vec<String>, CatalogError> {
        Self::instance_names(&soa_dir.join(service).join(scheduler.config_file_name(cluster)))
    }

    fn services_for_cluster(
        &self,
        soa_dir: &Path,
        cluster: &str,
        scheduler: SchedulerType,
    ) -> Result<Vec<JobId>, CatalogError> {
        let mut jobs = Vec::new();
        for (service, dir) in Self::service_dirs(soa_dir)? {
            for instance in Self::instance_names(&dir.join(scheduler.config_file_name(cluster)))? {
                jobs.push(JobId::new(service.clone(), instance));
            }
        }
        Ok(jobs)
    }

    fn load_job_config(
        &self,
        soa_dir: &Path,
        service: &str,
        instance: &str,
        cluster: &str,
    ) -> Result<DependencyBatchJob, CatalogError> {
        let path = soa_dir
            .join(service)
            .join(SchedulerType::DependencyBatch.config_file_name(cluster));
        let block = Self::instance_blocks(&path)?
            .into_iter()
            .find(|(name, _)| name == instance)
            .map(|(_, block)| block)
            .ok_or_else(|| {
                CatalogError::NotFound(format!("{} in {}", JobId::new(service, instance), path.display()))
            })?;
        if block.is_null() {
            return Ok(DependencyBatchJob::default());
        }
        serde_yaml::from_value(block).map_err(|e| CatalogError::Parse {
            path,
            reason: format!("instance {instance}: {e}"),
        })
    }

    fn list_batch_clusters(
        &self,
        soa_dir: &Path,
        service: &str,
    ) -> Result<Vec<String>, CatalogError> {
        let dir = soa_dir.join(service);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        Ok(Self::file_names(&dir)
            .iter()
            .filter_map(|name| SchedulerType::PeriodicBatch.cluster_from_file_name(name))
            .map(str::to_string)
            .collect())
    }

    fn complete_config_check(
        &self,
        soa_dir: &Path,
        service: &str,
        cluster: &str,
        layout: NamespaceLayout,
    ) -> Result<Vec<String>, CatalogError> {
        let path = layout.namespace_path(soa_dir, service, cluster);
        if !path.is_file() {
            return Ok(vec![format!(
                "No {} config found for service {service} in cluster {cluster}",
                SchedulerType::PeriodicBatch
            )]);
        }
        let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "checking periodic-batch namespace");
        Ok(check_namespace(&content))
    }
}
