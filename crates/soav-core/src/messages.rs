//! # Diagnostic Messages
//!
//! Literal user-facing text. External tooling greps for [`SCHEMA_VALID`] and
//! [`SCHEMA_INVALID`], so these strings are stable.

use std::path::Path;

use crate::identity::{JobId, TMP_JOB_IDENTIFIER};
use crate::scheduler::SchedulerType;

/// Marker on every line reporting a structurally valid file.
pub const SCHEMA_VALID: &str = "Successfully validated schema";

/// Marker on every line reporting a structural violation.
pub const SCHEMA_INVALID: &str = "Failed to validate schema";

/// No schema is registered for the requested scheduler type.
pub const SCHEMA_NOT_FOUND: &str = "Failed to find schema to validate against";

/// The bundled schema could not be compiled.
pub const SCHEMA_ERROR: &str = "Failed to load schema";

/// The file could not be read.
pub const FAILED_READING_FILE: &str = "Failed to read file";

/// Printed when neither a service name nor a usable working directory is given.
pub const UNKNOWN_SERVICE: &str = "Unable to determine service to validate.\n\
Please supply the service name you wish to validate with the -s option.\n\
You can also execute soav validate from within the root directory of the service you wish to validate.";

/// `<path> is not a directory`
pub fn not_a_directory(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("{} is not a directory", p.display()),
        None => "None is not a directory".to_string(),
    }
}

/// `<path> does not contain any .yaml files`
pub fn no_config_files(path: &Path) -> String {
    format!("{} does not contain any .yaml files", path.display())
}

/// Rejection of a service named after the temporary-job identifier.
pub fn reserved_service_name() -> String {
    format!(
        "Services using scheduled tasks cannot be named {TMP_JOB_IDENTIFIER}, as it clashes \
         with the identifier used for temporary jobs"
    )
}

/// A job lists itself among its parents.
pub fn self_dependency(job: &JobId) -> String {
    format!("Job {job} cannot depend on itself")
}

/// A parent job does not exist in the cluster.
pub fn missing_parent(parent: &JobId) -> String {
    format!("Parent job {parent} could not be found")
}

/// One failing check on a dependency-batch instance.
pub fn invalid_scheduled_job(cluster: &str, instance: &str, message: &str) -> String {
    format!(
        "{} has an invalid instance: {instance}.\n  {message}",
        SchedulerType::DependencyBatch.config_file_name(cluster)
    )
}

/// A dependency-batch instance that passed every check.
pub fn valid_scheduled_job(cluster: &str, instance: &str) -> String {
    format!(
        "{} has a valid instance: {instance}.",
        SchedulerType::DependencyBatch.config_file_name(cluster)
    )
}

/// A periodic-batch namespace with complete-config errors.
pub fn invalid_batch_namespace(display_name: &str, errors: &[String]) -> String {
    format!("{display_name} is invalid:\n  {}", errors.join("\n  "))
}

/// A periodic-batch namespace that passed every check.
pub fn valid_batch_namespace(display_name: &str) -> String {
    format!("{display_name} is valid.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_job_lines_name_the_cluster_file() {
        let line = invalid_scheduled_job("penguin", "fake-instance", "something is wrong");
        assert_eq!(
            line,
            "dependency-batch-penguin.yaml has an invalid instance: fake-instance.\n  something is wrong"
        );
        assert_eq!(
            valid_scheduled_job("penguin", "fake-instance"),
            "dependency-batch-penguin.yaml has a valid instance: fake-instance."
        );
    }

    #[test]
    fn graph_messages() {
        let job = JobId::new("fake-service", "fake-instance");
        assert_eq!(
            self_dependency(&job),
            "Job fake-service.fake-instance cannot depend on itself"
        );
        let parent = JobId::new("fake-service", "parent-1");
        assert_eq!(
            missing_parent(&parent),
            "Parent job fake-service.parent-1 could not be found"
        );
    }

    #[test]
    fn reserved_name_mentions_identifier() {
        assert!(reserved_service_name().contains("cannot be named tmp"));
    }

    #[test]
    fn batch_namespace_lines() {
        assert_eq!(valid_batch_namespace("periodic-batch-dev.yaml"), "periodic-batch-dev.yaml is valid.");
        let errors = vec!["first".to_string(), "second".to_string()];
        assert_eq!(
            invalid_batch_namespace("dev/foo.yaml", &errors),
            "dev/foo.yaml is invalid:\n  first\n  second"
        );
    }

    #[test]
    fn path_messages() {
        assert_eq!(not_a_directory(None), "None is not a directory");
        assert_eq!(
            not_a_directory(Some(Path::new("fake/path"))),
            "fake/path is not a directory"
        );
        assert_eq!(
            no_config_files(Path::new("fake/path")),
            "fake/path does not contain any .yaml files"
        );
    }
}
