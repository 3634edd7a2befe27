//! Command-line interface for skillgraph.
//!
//! Two subcommands cover the whole surface: `build` scans a registry and
//! writes the manifest, `check` evaluates the same scan as a CI gate.
//! Global flags control verbosity, progress display, and the configuration
//! file path.
//!
//! # Global Options
//!
//! - `-v/--verbose` - debug-level logging
//! - `-q/--quiet` - errors only
//! - `-c/--config` - explicit `skillgraph.toml` path (also honors the
//!   `SKILLGRAPH_CONFIG` environment variable)
//! - `--no-progress` - disable spinners, for CI and piped output
//!
//! # Example
//!
//! ```bash
//! skillgraph build ./skills -o skills-manifest.json
//! skillgraph check ./skills --format json --strict
//! ```

mod build;
mod check;

pub use build::BuildCommand;
pub use check::{CheckCommand, OutputFormat};

use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_ENV_VAR;

/// One-time guard for subscriber installation
static INIT_LOGGING: Once = Once::new();

/// Runtime configuration derived from the global CLI flags.
///
/// Holds settings that downstream code reads from the environment, so tests
/// and programmatic callers can inject them without re-parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter level; `None` defers to `RUST_LOG`
    pub log_level: Option<String>,
    /// Disable progress indicators
    pub no_progress: bool,
    /// Explicit configuration file path
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the configuration to the process environment.
    ///
    /// Must run on the main thread before the runtime spawns workers;
    /// environment mutation is process-global.
    pub fn apply_to_env(&self) {
        unsafe {
            if self.no_progress {
                std::env::set_var("SKILLGRAPH_NO_PROGRESS", "1");
            }

            if let Some(ref path) = self.config_path {
                std::env::set_var(CONFIG_ENV_VAR, path);
            }
        }
    }
}

/// Top-level CLI parser.
#[derive(Parser)]
#[command(
    name = "skillgraph",
    about = "Skill registry validator and dependency graph builder",
    version,
    author,
    long_about = "skillgraph scans a registry of SKILL.md packages, validates their \
                  metadata and relationships, and emits a consolidated JSON manifest \
                  covering dependencies, conflicts, and structural diagnostics."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug-level logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    ///
    /// Overrides the usual discovery walk; the file must exist when this
    /// flag (or `SKILLGRAPH_CONFIG`) is given.
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable progress indicators
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the manifest and write it to disk (or stdout)
    Build(BuildCommand),
    /// Build the manifest in memory and evaluate it as a CI gate
    Check(CheckCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// Verbose maps to `debug`, quiet to `error`; with neither flag the
    /// level stays unset so `RUST_LOG` is honored.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply_to_env();
        init_logging(config.log_level.as_deref());

        match self.command {
            Commands::Build(cmd) => cmd.execute_with_config_path(self.config).await,
            Commands::Check(cmd) => cmd.execute_with_config_path(self.config).await,
        }
    }
}

/// Install the tracing subscriber once for the process.
///
/// An explicit level from the verbosity flags wins; otherwise `RUST_LOG`
/// is used, falling back to `info`. Output goes to stderr so manifest
/// bytes on stdout stay clean.
fn init_logging(level: Option<&str>) {
    INIT_LOGGING.call_once(|| {
        let filter = match level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
