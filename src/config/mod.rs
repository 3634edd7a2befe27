//! Configuration loading for skillgraph.
//!
//! An optional `skillgraph.toml` supplies defaults for the CLI: the registry
//! root, the manifest output path, directory ignore patterns, and the
//! `check` command's failure policy. All fields are optional and fall back
//! to built-in defaults.
//!
//! ```toml
//! root = "skills"
//! output = "skills-manifest.json"
//! ignore = ["drafts-*", "_*"]
//! fail_on = ["errors", "cycles", "conflicts"]
//! ```
//!
//! Resolution order: an explicit path (`--config` flag or the
//! `SKILLGRAPH_CONFIG` environment variable, resolved by the CLI) wins and
//! must exist; otherwise the file is discovered by walking up from the
//! current directory, and absence simply yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{CONFIG_FILE, DEFAULT_MANIFEST_FILE};
use crate::core::SkillgraphError;

/// Diagnostic classes the `check` command can treat as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Per-skill load errors
    Errors,
    /// Circular dependencies
    Cycles,
    /// Conflict issues
    Conflicts,
}

/// Resolved configuration with every field defaulted.
///
/// Unknown keys in the file are rejected so typos surface instead of being
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Registry root scanned for skill directories
    pub root: PathBuf,

    /// Manifest output path used by `build` when `--output` is not given
    pub output: PathBuf,

    /// Glob patterns for registry subdirectories to skip
    pub ignore: Vec<String>,

    /// Which diagnostic classes make `check` exit non-zero
    pub fail_on: Vec<FailOn>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_MANIFEST_FILE),
            ignore: Vec::new(),
            fail_on: vec![FailOn::Errors, FailOn::Cycles, FailOn::Conflicts],
        }
    }
}

impl Config {
    /// Resolve configuration for one CLI invocation.
    ///
    /// With an explicit path the file must exist; without one the config is
    /// discovered by walking up from the current directory, and a missing
    /// file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SkillgraphError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            return Self::load_from(path);
        }

        match Self::discover() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| SkillgraphError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Find `skillgraph.toml` by walking up from the current directory.
    fn discover() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_config_from(current)
    }

    /// Find `skillgraph.toml` by walking up from a starting directory.
    ///
    /// Checks each directory from `current` to the filesystem root and
    /// returns the first match.
    pub fn find_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.exists() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Compile the ignore globs into matchers.
    ///
    /// Infallible after [`validate`](Self::validate) has accepted the
    /// patterns; kept fallible so direct callers get the same diagnostics.
    pub fn compiled_ignore(&self) -> Result<Vec<Pattern>> {
        self.ignore
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| {
                    SkillgraphError::ConfigValidationError {
                        reason: format!("invalid ignore pattern '{raw}': {e}"),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Reject configurations with unusable values.
    fn validate(&self) -> Result<()> {
        self.compiled_ignore()?;
        Ok(())
    }
}
