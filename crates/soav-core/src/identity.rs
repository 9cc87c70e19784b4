//! # Job Identifiers
//!
//! Dependency-batch jobs refer to their parents by a composite string
//! `<service>.<instance>`. Inside soav those references are parsed once into
//! a [`JobId`] and compared structurally, so a `.` inside either component
//! can never make two different jobs compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between service and instance in boundary job identifiers.
pub const INTERNAL_SPACER: &str = ".";

/// Service name reserved for internally generated temporary jobs.
pub const TMP_JOB_IDENTIFIER: &str = "tmp";

/// A `(service, instance)` pair naming one job within a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId {
    /// Owning service.
    pub service: String,
    /// Instance name within the service.
    pub instance: String,
}

impl JobId {
    /// Build an identifier from its parts.
    pub fn new(service: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            instance: instance.into(),
        }
    }

    /// Parse a boundary identifier of the form `<service>.<instance>`.
    ///
    /// Splits on the first spacer. Returns `None` when the spacer is missing
    /// or either side is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let (service, instance) = raw.split_once(INTERNAL_SPACER)?;
        if service.is_empty() || instance.is_empty() {
            return None;
        }
        Some(Self::new(service, instance))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{INTERNAL_SPACER}{}", self.service, self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed() {
        let id = JobId::parse("fake-service.fake-instance").unwrap();
        assert_eq!(id, JobId::new("fake-service", "fake-instance"));
    }

    #[test]
    fn parse_splits_on_first_spacer() {
        let id = JobId::parse("svc.daily.backup").unwrap();
        assert_eq!(id.service, "svc");
        assert_eq!(id.instance, "daily.backup");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(JobId::parse("no-spacer").is_none());
        assert!(JobId::parse(".instance").is_none());
        assert!(JobId::parse("service.").is_none());
        assert!(JobId::parse("").is_none());
    }

    #[test]
    fn display_uses_spacer() {
        assert_eq!(JobId::new("a", "b").to_string(), "a.b");
    }

    #[test]
    fn structural_equality_ignores_spacer_ambiguity() {
        // Both render as "a.b.c" but name different jobs.
        let left = JobId::new("a.b", "c");
        let right = JobId::new("a", "b.c");
        assert_eq!(left.to_string(), right.to_string());
        assert_ne!(left, right);
    }
}
