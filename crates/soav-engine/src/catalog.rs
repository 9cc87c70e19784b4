//! # Collaborator Traits
//!
//! The validators need answers about the whole config root (which clusters
//! exist, which jobs run in each) and a way to load one job's config. Those
//! answers come from a [`Catalog`]. Every method takes the config root so a
//! single catalog can serve any tree.

use std::path::{Path, PathBuf};

use soav_core::{CatalogError, JobId, SchedulerType};

/// A loaded dependency-batch job, seen only through the checks it supports.
pub trait JobConfig {
    /// Boundary identifiers (`<service>.<instance>`) of the jobs this job
    /// runs after, in declaration order. `None` when the job has no parents.
    fn parents(&self) -> Option<&[String]>;

    /// The job's own consistency checks: `(is_valid, messages)`.
    fn validate(&self) -> (bool, Vec<String>);
}

/// Read access to the clusters, services and instances under a config root.
pub trait Catalog {
    /// Concrete job type returned by [`Catalog::load_job_config`].
    type Job: JobConfig;

    /// All clusters with config for `scheduler`, sorted.
    fn list_clusters(
        &self,
        soa_dir: &Path,
        scheduler: SchedulerType,
    ) -> Result<Vec<String>, CatalogError>;

    /// Instance names `service` defines for `scheduler` in `cluster`.
    fn list_instances_for_service(
        &self,
        soa_dir: &Path,
        service: &str,
        cluster: &str,
        scheduler: SchedulerType,
    ) -> Result<Vec<String>, CatalogError>;

    /// Every `(service, instance)` pair defined for `scheduler` in `cluster`.
    fn services_for_cluster(
        &self,
        soa_dir: &Path,
        cluster: &str,
        scheduler: SchedulerType,
    ) -> Result<Vec<JobId>, CatalogError>;

    /// Load one dependency-batch job.
    ///
    /// # Errors
    ///
    /// `CatalogError::NotFound` when the instance does not exist.
    fn load_job_config(
        &self,
        soa_dir: &Path,
        service: &str,
        instance: &str,
        cluster: &str,
    ) -> Result<Self::Job, CatalogError>;

    /// Clusters `service` has a periodic-batch namespace for, sorted.
    fn list_batch_clusters(&self, soa_dir: &Path, service: &str)
        -> Result<Vec<String>, CatalogError>;

    /// The periodic-batch scheduler's own semantic check of one namespace,
    /// read from the file `layout` names. An empty result means the
    /// namespace is complete.
    fn complete_config_check(
        &self,
        soa_dir: &Path,
        service: &str,
        cluster: &str,
        layout: NamespaceLayout,
    ) -> Result<Vec<String>, CatalogError>;
}

/// Where a periodic-batch namespace file lives under the config root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceLayout {
    /// `<soa_dir>/<service>/periodic-batch-<cluster>.yaml`
    ServiceDir,
    /// `<soa_dir>/periodic-batch/<cluster>/<service>.yaml`
    ClusterDir,
}

impl NamespaceLayout {
    /// Path of `service`'s namespace file for `cluster` in this layout.
    pub fn namespace_path(&self, soa_dir: &Path, service: &str, cluster: &str) -> PathBuf {
        let scheduler = SchedulerType::PeriodicBatch;
        match self {
            NamespaceLayout::ServiceDir => {
                soa_dir.join(service).join(scheduler.config_file_name(cluster))
            }
            NamespaceLayout::ClusterDir => soa_dir
                .join(scheduler.as_str())
                .join(cluster)
                .join(format!("{service}.yaml")),
        }
    }
}
