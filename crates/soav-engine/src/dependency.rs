//! # Dependency-Batch Validation
//!
//! For every cluster, build the set of jobs that exist there, then check
//! each of the target service's jobs: it may not list itself as a parent,
//! every parent must exist in the same cluster, and the job's own
//! [`JobConfig::validate`] must pass.
//!
//! Every instance is checked; one failure does not stop the rest.

use std::collections::HashSet;
use std::path::Path;

use soav_core::messages::{
    invalid_scheduled_job, missing_parent, reserved_service_name, self_dependency,
    valid_scheduled_job,
};
use soav_core::{JobId, SchedulerType, ValidationReport, TMP_JOB_IDENTIFIER};

use crate::catalog::{Catalog, JobConfig};
use crate::error::EngineError;
use crate::paths::soa_dir_and_service;

/// Every job defined for one cluster. Rebuilt per cluster per run.
#[derive(Debug, Default)]
pub struct DependencyGraphView {
    jobs: HashSet<JobId>,
}

impl DependencyGraphView {
    /// Populate the view from the catalog before any lookup runs against it.
    pub fn for_cluster<C: Catalog>(
        catalog: &C,
        soa_dir: &Path,
        cluster: &str,
    ) -> Result<Self, EngineError> {
        let jobs = catalog
            .services_for_cluster(soa_dir, cluster, SchedulerType::DependencyBatch)?
            .into_iter()
            .collect();
        Ok(Self { jobs })
    }

    /// Returns true if `job` is defined in this cluster.
    pub fn contains(&self, job: &JobId) -> bool {
        self.jobs.contains(job)
    }

    /// Number of jobs defined in this cluster.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true if the cluster defines no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Check every dependency-batch job of the service at `service_path`.
///
/// # Errors
///
/// Fails only when the catalog cannot enumerate clusters or instances. A job
/// that cannot be loaded is reported as invalid.
pub fn validate_dependency_batch<C: Catalog>(
    catalog: &C,
    service_path: &Path,
) -> Result<ValidationReport, EngineError> {
    let (soa_dir, service) = soa_dir_and_service(service_path);
    let mut report = ValidationReport::new();

    if service == TMP_JOB_IDENTIFIER {
        report.fail(reserved_service_name());
        return Ok(report);
    }

    let scheduler = SchedulerType::DependencyBatch;
    for cluster in catalog.list_clusters(&soa_dir, scheduler)? {
        let graph = DependencyGraphView::for_cluster(catalog, &soa_dir, &cluster)?;
        let instances =
            catalog.list_instances_for_service(&soa_dir, &service, &cluster, scheduler)?;
        tracing::debug!(%cluster, jobs = graph.len(), instances = instances.len(), "checking job graph");

        for instance in instances {
            let problems = check_instance(catalog, &soa_dir, &graph, &service, &instance, &cluster);
            if problems.is_empty() {
                report.pass(valid_scheduled_job(&cluster, &instance));
            }
            for problem in problems {
                report.fail(invalid_scheduled_job(&cluster, &instance, &problem));
            }
        }
    }
    Ok(report)
}

/// All problems with one job, de-duplicated in first-seen order.
fn check_instance<C: Catalog>(
    catalog: &C,
    soa_dir: &Path,
    graph: &DependencyGraphView,
    service: &str,
    instance: &str,
    cluster: &str,
) -> Vec<String> {
    let job = match catalog.load_job_config(soa_dir, service, instance, cluster) {
        Ok(job) => job,
        Err(e) => {
            tracing::debug!(%cluster, %service, %instance, error = %e, "job failed to load");
            return vec![format!("Unable to load job config: {e}")];
        }
    };

    let own = JobId::new(service, instance);
    let mut problems = Vec::new();

    // Parents without a spacer are left to the job's own validation.
    for parent in job.parents().unwrap_or_default() {
        let Some(parent) = JobId::parse(parent) else {
            continue;
        };
        if parent == own {
            problems.push(self_dependency(&own));
        } else if !graph.contains(&parent) {
            problems.push(missing_parent(&parent));
        }
    }

    let (valid, messages) = job.validate();
    if !valid {
        if messages.is_empty() {
            problems.push("Job config is invalid".to_string());
        }
        problems.extend(messages);
    }

    let mut seen = HashSet::new();
    problems.retain(|p| seen.insert(p.clone()));
    problems
}
