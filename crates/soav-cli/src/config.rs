//! # Configuration Root
//!
//! Where the per-service config directories live. Resolved from, in order:
//! the `--soa-dir` flag, the `SOAV_SOA_DIR` environment variable, and the
//! built-in default.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default configuration root.
pub const DEFAULT_SOA_DIR: &str = "/etc/soa-configs";

/// Environment variable overriding [`DEFAULT_SOA_DIR`].
pub const SOA_DIR_ENV: &str = "SOAV_SOA_DIR";

/// Resolve the configuration root from the flag and the process environment.
pub fn soa_dir(flag: Option<&Path>) -> PathBuf {
    resolve_soa_dir(flag, std::env::var_os(SOA_DIR_ENV))
}

/// Resolve the configuration root from an explicit flag and env value.
pub fn resolve_soa_dir(flag: Option<&Path>, env: Option<OsString>) -> PathBuf {
    if let Some(flag) = flag {
        return flag.to_path_buf();
    }
    match env.filter(|v| !v.is_empty()) {
        Some(value) => PathBuf::from(value),
        None => PathBuf::from(DEFAULT_SOA_DIR),
    }
}
