//! # soav-cli: Service Config Validation CLI
//!
//! Provides the `soav` command-line interface.
//!
//! ```bash
//! soav validate -s web                 # /etc/soa-configs/web
//! soav validate -s web -y ./soa-configs
//! cd soa-configs/web && soav validate  # service taken from the working directory
//! ```
//!
//! The report goes to stdout, logs to stderr. Exit status is 0 when every
//! check passed and 1 otherwise.

pub mod config;
pub mod validate;
