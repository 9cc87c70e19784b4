//! # Periodic-Batch Namespace Check
//!
//! The "complete config" check for one periodic-batch namespace file: the
//! rules the schema cannot express because they relate entries to each other.
//!
//! - Job names are unique within the namespace.
//! - Every job has at least one action, and action names are unique per job.
//! - Every action has a non-empty command.
//! - `requires` only names actions of the same job, and the resulting
//!   action graph is acyclic.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Namespace {
    jobs: Vec<JobEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JobEntry {
    name: Option<String>,
    actions: Vec<ActionEntry>,
    cleanup_action: Option<ActionEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActionEntry {
    name: Option<String>,
    command: Option<String>,
    requires: Vec<String>,
}

/// Check one namespace document. Returns the error messages in document
/// order; an empty vector means the namespace is complete.
pub fn check_namespace(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    match serde_yaml::from_str::<Option<Namespace>>(content) {
        Ok(namespace) => check_jobs(&namespace.unwrap_or_default()),
        Err(e) => vec![format!("Unable to load periodic-batch config: {e}")],
    }
}

fn check_jobs(namespace: &Namespace) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, job) in namespace.jobs.iter().enumerate() {
        let label = match &job.name {
            Some(name) => name.clone(),
            None => format!("#{index}"),
        };
        if let Some(name) = &job.name {
            if !seen.insert(name.as_str()) {
                errors.push(format!("Job {name} is defined more than once"));
            }
        }
        check_actions(&label, job, &mut errors);
    }
    errors
}

fn check_actions(job: &str, definition: &JobEntry, errors: &mut Vec<String>) {
    if definition.actions.is_empty() {
        errors.push(format!("Job {job} has no actions"));
        return;
    }

    let mut graph = DiGraph::<&str, ()>::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
    for action in &definition.actions {
        let Some(name) = action.name.as_deref() else {
            continue;
        };
        if nodes.contains_key(name) {
            errors.push(format!("Job {job} defines action {name} more than once"));
            continue;
        }
        nodes.insert(name, graph.add_node(name));
    }

    for action in &definition.actions {
        let name = action.name.as_deref().unwrap_or("(unnamed)");
        if action.command.as_deref().map_or(true, |c| c.trim().is_empty()) {
            errors.push(format!("Action {job}.{name} has no command"));
        }
        let Some(&target) = action.name.as_deref().and_then(|n| nodes.get(n)) else {
            continue;
        };
        for required in &action.requires {
            match nodes.get(required.as_str()) {
                Some(&source) => {
                    graph.add_edge(source, target, ());
                }
                None => errors.push(format!(
                    "Action {job}.{name} requires unknown action {required}"
                )),
            }
        }
    }

    if let Some(cleanup) = &definition.cleanup_action {
        if cleanup.command.as_deref().map_or(true, |c| c.trim().is_empty()) {
            errors.push(format!("Cleanup action of job {job} has no command"));
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        errors.push(format!(
            "Job {job} has a dependency cycle involving action {}",
            graph[cycle.node_id()]
        ));
    }
}
