//! # Validation Reports
//!
//! A [`ValidationReport`] is the only thing a validator hands back to its
//! caller for user-facing problems: an ordered list of diagnostic lines and
//! a single pass/fail outcome. Reports are merged with a logical AND, and
//! diagnostics keep the order in which checks ran so that two runs over the
//! same input print byte-identical output.

use std::fmt;

use serde::Serialize;

/// Classification of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// A check passed.
    Pass,
    /// A check failed. Any `Fail` line makes the report invalid.
    Fail,
    /// Supporting detail with no outcome of its own.
    Info,
}

/// One line of user-facing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Outcome class.
    pub status: Status,
    /// Literal message text.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Status::Pass => write!(f, "\u{2713} {}", self.message),
            Status::Fail => write!(f, "\u{2717} {}", self.message),
            Status::Info => f.write_str(&self.message),
        }
    }
}

/// Ordered diagnostics plus an overall outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
    failed: bool,
}

impl ValidationReport {
    /// An empty, valid report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a passing check.
    pub fn pass(&mut self, message: impl Into<String>) {
        self.push(Status::Pass, message.into());
    }

    /// Record a failing check. The report becomes invalid.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failed = true;
        self.push(Status::Fail, message.into());
    }

    /// Record supporting detail without changing the outcome.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Status::Info, message.into());
    }

    /// Mark the report invalid without adding a line.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Append another report's lines and AND its outcome into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.failed |= other.failed;
        self.diagnostics.extend(other.diagnostics);
    }

    /// True iff no check failed.
    pub fn is_valid(&self) -> bool {
        !self.failed
    }

    /// All diagnostics in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if any rendered line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.to_string().contains(needle))
    }

    fn push(&mut self, status: Status, message: String) {
        self.diagnostics.push(Diagnostic { status, message });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}
