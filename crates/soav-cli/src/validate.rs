//! # Validate Subcommand
//!
//! Validates one service: its schema-checked config files, its dependency-batch
//! job graph, and its periodic-batch namespaces.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use soav_core::ValidationReport;
use soav_engine::{ServiceValidator, SoaDirCatalog};
use soav_schema::{StructuralValidator, UnknownSchemaPolicy};

/// Arguments for the `soav validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Service to validate. Defaults to the service in the working directory.
    #[arg(short, long)]
    pub service: Option<String>,

    /// Configuration root holding one directory per service.
    #[arg(short = 'y', long, value_name = "DIR")]
    pub soa_dir: Option<PathBuf>,

    /// Treat a file with no registered schema as a failure.
    #[arg(long)]
    pub strict: bool,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every check passed, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let report = validate(args, &cwd)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else if !report.diagnostics().is_empty() {
        println!("{report}");
    }

    if report.is_valid() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Run the validation pass for `args` with `cwd` as the working directory.
pub fn validate(args: &ValidateArgs, cwd: &Path) -> Result<ValidationReport> {
    let soa_dir = crate::config::soa_dir(args.soa_dir.as_deref());
    let policy = if args.strict {
        UnknownSchemaPolicy::Strict
    } else {
        UnknownSchemaPolicy::Permissive
    };
    tracing::debug!(soa_dir = %soa_dir.display(), ?policy, "starting validation");

    let validator = ServiceValidator::new(SoaDirCatalog::new(), StructuralValidator::new(policy));
    validator
        .validate_service(args.service.as_deref(), &soa_dir, cwd)
        .with_context(|| format!("validation of {} did not complete", soa_dir.display()))
}
