//! # Dependency-Batch Job
//!
//! The typed view of one dependency-batch instance block, as loaded by
//! [`crate::SoaDirCatalog`]. Only the fields the checks read are modelled;
//! everything else in the block was already covered by the structural pass.

use serde::Deserialize;
use soav_core::JobId;

use crate::catalog::JobConfig;

/// One dependency-batch instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DependencyBatchJob {
    /// Cron expression or ISO 8601 repeating interval.
    pub schedule: Option<String>,
    /// Only meaningful alongside `schedule`.
    pub schedule_time_zone: Option<String>,
    /// Boundary identifiers of the jobs this one runs after.
    pub parents: Option<Vec<String>>,
    pub cmd: Option<String>,
    pub retries: Option<i64>,
}

impl DependencyBatchJob {
    fn has_parents(&self) -> bool {
        self.parents.as_ref().is_some_and(|p| !p.is_empty())
    }
}

impl JobConfig for DependencyBatchJob {
    fn parents(&self) -> Option<&[String]> {
        self.parents.as_deref()
    }

    fn validate(&self) -> (bool, Vec<String>) {
        let mut messages = Vec::new();

        match (&self.schedule, self.has_parents()) {
            (Some(_), true) => messages.push(
                "A job may declare either a schedule or parents, but not both".to_string(),
            ),
            (None, false) => messages.push(
                "A job must declare either a schedule or parents".to_string(),
            ),
            _ => {}
        }

        if let Some(schedule) = &self.schedule {
            if let Err(msg) = check_schedule(schedule) {
                messages.push(msg);
            }
        } else if self.schedule_time_zone.is_some() {
            messages.push("schedule_time_zone is only valid together with a schedule".to_string());
        }

        for parent in self.parents.iter().flatten() {
            if JobId::parse(parent).is_none() {
                messages.push(format!(
                    "The parent format for {parent} is invalid; expected <service>.<instance>"
                ));
            }
        }

        if self.cmd.as_deref().is_some_and(|c| c.trim().is_empty()) {
            messages.push("cmd must not be empty".to_string());
        }
        if let Some(retries) = self.retries.filter(|r| *r < 0) {
            messages.push(format!("retries must be a non-negative integer, got {retries}"));
        }

        (messages.is_empty(), messages)
    }
}

/// Accepts an ISO 8601 repeating interval (`R[n]/<start>/<period>`), a cron
/// macro (`@daily`), or a five or six field cron expression.
fn check_schedule(schedule: &str) -> Result<(), String> {
    let trimmed = schedule.trim();
    if trimmed.is_empty() {
        return Err("schedule must not be empty".to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('R') {
        let parts: Vec<&str> = rest.split('/').collect();
        let repeats_ok = parts[0].is_empty() || parts[0].bytes().all(|b| b.is_ascii_digit());
        if parts.len() == 3 && repeats_ok && parts[2].starts_with('P') {
            return Ok(());
        }
        return Err(format!(
            "The schedule {schedule} is not a valid ISO 8601 repeating interval"
        ));
    }
    if trimmed.starts_with('@') {
        return Ok(());
    }
    match trimmed.split_whitespace().count() {
        5 | 6 => Ok(()),
        _ => Err(format!(
            "The schedule {schedule} is neither a cron expression nor an ISO 8601 repeating interval"
        )),
    }
}
