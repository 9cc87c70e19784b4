//! In-memory [`Catalog`] for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::Path;

use soav_core::{CatalogError, JobId, SchedulerType};

use crate::catalog::{Catalog, JobConfig, NamespaceLayout};

#[derive(Debug, Clone, Default)]
pub struct FakeJob {
    pub parents: Option<Vec<String>>,
    pub messages: Vec<String>,
}

impl FakeJob {
    pub fn with_parents(parents: &[&str]) -> Self {
        Self {
            parents: Some(parents.iter().map(|p| p.to_string()).collect()),
            messages: Vec::new(),
        }
    }
}

impl JobConfig for FakeJob {
    fn parents(&self) -> Option<&[String]> {
        self.parents.as_deref()
    }

    fn validate(&self) -> (bool, Vec<String>) {
        (self.messages.is_empty(), self.messages.clone())
    }
}

/// Jobs keyed by `(cluster, service, instance)`. Every registered job is
/// both listed and loadable unless it is also in `unloadable`.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub jobs: BTreeMap<(String, String, String), FakeJob>,
    pub unloadable: Vec<(String, String, String)>,
    pub batch_clusters: Vec<String>,
    pub batch_errors: BTreeMap<String, Vec<String>>,
    pub broken: bool,
    pub calls: Cell<usize>,
    pub layouts: RefCell<Vec<NamespaceLayout>>,
}

impl FakeCatalog {
    pub fn job(mut self, cluster: &str, service: &str, instance: &str, job: FakeJob) -> Self {
        self.jobs
            .insert((cluster.into(), service.into(), instance.into()), job);
        self
    }

    fn touch(&self) -> Result<(), CatalogError> {
        self.calls.set(self.calls.get() + 1);
        if self.broken {
            return Err(CatalogError::NotFound("cluster listing".to_string()));
        }
        Ok(())
    }
}

impl Catalog for FakeCatalog {
    type Job = FakeJob;

    fn list_clusters(&self, _: &Path, _: SchedulerType) -> Result<Vec<String>, CatalogError> {
        self.touch()?;
        let mut clusters: Vec<String> = self.jobs.keys().map(|(c, _, _)| c.clone()).collect();
        clusters.dedup();
        Ok(clusters)
    }

    fn list_instances_for_service(
        &self,
        _: &Path,
        service: &str,
        cluster: &str,
        _: SchedulerType,
    ) -> Result<Vec<String>, CatalogError> {
        self.touch()?;
        Ok(self
            .jobs
            .keys()
            .filter(|(c, s, _)| c == cluster && s == service)
            .map(|(_, _, i)| i.clone())
            .collect())
    }

    fn services_for_cluster(
        &self,
        _: &Path,
        cluster: &str,
        _: SchedulerType,
    ) -> Result<Vec<JobId>, CatalogError> {
        self.touch()?;
        Ok(self
            .jobs
            .keys()
            .filter(|(c, _, _)| c == cluster)
            .map(|(_, s, i)| JobId::new(s.clone(), i.clone()))
            .collect())
    }

    fn load_job_config(
        &self,
        _: &Path,
        service: &str,
        instance: &str,
        cluster: &str,
    ) -> Result<FakeJob, CatalogError> {
        self.touch()?;
        let key = (cluster.to_string(), service.to_string(), instance.to_string());
        if self.unloadable.contains(&key) {
            return Err(CatalogError::NotFound(format!("{service}.{instance}")));
        }
        self.jobs
            .get(&key)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("{service}.{instance}")))
    }

    fn list_batch_clusters(&self, _: &Path, _: &str) -> Result<Vec<String>, CatalogError> {
        self.touch()?;
        Ok(self.batch_clusters.clone())
    }

    fn complete_config_check(
        &self,
        _: &Path,
        _: &str,
        cluster: &str,
        layout: NamespaceLayout,
    ) -> Result<Vec<String>, CatalogError> {
        self.touch()?;
        self.layouts.borrow_mut().push(layout);
        Ok(self.batch_errors.get(cluster).cloned().unwrap_or_default())
    }
}
