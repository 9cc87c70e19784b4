//! # Scheduler Types
//!
//! The closed set of scheduler backends soav knows how to validate. Each
//! backend owns a structural schema and a per-cluster file naming convention
//! `<identifier>-<cluster>.yaml`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A scheduler backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulerType {
    /// Long-running services dispatched as soon as they are deployed.
    InstantDispatch,
    /// Batch jobs grouped into per-cluster namespaces of `jobs`.
    PeriodicBatch,
    /// Scheduled jobs that may depend on other jobs in the same cluster.
    DependencyBatch,
}

/// Returned when parsing an identifier outside the closed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scheduler type: {0}")]
pub struct UnknownSchedulerType(pub String);

impl SchedulerType {
    /// Every scheduler type, in a fixed order.
    pub const ALL: [SchedulerType; 3] = [
        SchedulerType::InstantDispatch,
        SchedulerType::PeriodicBatch,
        SchedulerType::DependencyBatch,
    ];

    /// The identifier used in file names and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerType::InstantDispatch => "instant-dispatch",
            SchedulerType::PeriodicBatch => "periodic-batch",
            SchedulerType::DependencyBatch => "dependency-batch",
        }
    }

    /// File name holding this scheduler's config for one cluster.
    pub fn config_file_name(&self, cluster: &str) -> String {
        format!("{}-{cluster}.yaml", self.as_str())
    }

    /// Extract the cluster from a per-cluster file name, if the name follows
    /// this scheduler's convention.
    pub fn cluster_from_file_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let cluster = file_name
            .strip_prefix(self.as_str())?
            .strip_prefix('-')?
            .strip_suffix(".yaml")?;
        (!cluster.is_empty()).then_some(cluster)
    }

    /// The scheduler whose identifier prefixes `file_name`, if any.
    pub fn for_file_name(file_name: &str) -> Option<SchedulerType> {
        Self::ALL
            .into_iter()
            .find(|s| file_name.starts_with(s.as_str()))
    }
}

impl fmt::Display for SchedulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulerType {
    type Err = UnknownSchedulerType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownSchedulerType(s.to_string()))
    }
}
