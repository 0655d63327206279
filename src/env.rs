use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot of the process environment that spawned commands run with.
///
/// The environment contains:
/// - `vars`: variables visible to every executed command.
/// - `current_dir`: working directory for command execution and for resolving relative
///   discovery patterns.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<OsString, OsString>,
    /// The working directory for command execution.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process variables and working directory.
    ///
    /// Variables are kept as raw OS strings, so non-Unicode values are passed through.
    pub fn new() -> Self {
        let vars = stdenv::vars_os().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    /// Capture the process variables, but run from `dir` instead of the current directory.
    ///
    /// Relative paths are taken relative to the process working directory. Fails when `dir`
    /// does not name an existing directory.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        let canonical = fs::canonicalize(dir)
            .with_context(|| format!("can't canonicalize {}", dir.display()))?;
        if !canonical.is_dir() {
            anyhow::bail!("{} is not a directory", canonical.display());
        }
        Ok(Self {
            current_dir: canonical,
            ..Self::new()
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
