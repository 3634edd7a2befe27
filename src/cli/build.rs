//! Build command implementation.
//!
//! Scans a registry root, assembles the manifest, and writes it to disk
//! atomically (or prints it to stdout with `--stdout`). The command exits
//! successfully whenever a manifest is produced; per-skill errors, cycles,
//! and conflicts are reported in the summary but never fail the build.
//!
//! ```bash
//! skillgraph build                       # configured root, default output
//! skillgraph build ./skills -o out.json
//! skillgraph build --stdout | jq .stats
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::manifest::{Manifest, build_manifest};
use crate::utils::progress::ProgressBar;

/// Command to build the skills manifest from a registry root.
#[derive(Args)]
pub struct BuildCommand {
    /// Registry root directory (defaults to the configured root)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Manifest output path (defaults to the configured output)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the manifest to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

impl BuildCommand {
    /// Execute after resolving configuration from an optional explicit path.
    pub async fn execute_with_config_path(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = Config::load(config_path.as_deref())?;
        self.execute(&config).await
    }

    /// Execute the build against a resolved configuration.
    pub async fn execute(self, config: &Config) -> Result<()> {
        let root = self.root.clone().unwrap_or_else(|| config.root.clone());
        let ignore = config.compiled_ignore()?;

        let progress = ProgressBar::new_spinner();
        progress.set_prefix("Scanning");
        progress.set_message(root.display().to_string());

        let result = build_manifest(&root, &ignore).await;
        progress.finish_and_clear();
        let manifest = result?;

        if self.stdout {
            print!("{}", manifest.to_json()?);
            return Ok(());
        }

        let output = self.output.clone().unwrap_or_else(|| config.output.clone());
        manifest.save(&output)?;
        print_summary(&manifest, &output);

        Ok(())
    }
}

/// Print the post-build summary with counts for each diagnostic class.
fn print_summary(manifest: &Manifest, output: &Path) {
    println!(
        "{} Wrote manifest for {} skills to {}",
        "✓".green(),
        manifest.stats.total_skills,
        output.display()
    );

    if manifest.stats.errors > 0 {
        println!(
            "{} {} skills failed to load",
            "✗".red(),
            manifest.stats.errors
        );
    }

    if manifest.stats.circular_dependencies > 0 {
        println!(
            "{} {} circular dependencies",
            "⚠".yellow(),
            manifest.stats.circular_dependencies
        );
    }

    if manifest.stats.version_conflicts > 0 {
        println!(
            "{} {} conflict issues",
            "⚠".yellow(),
            manifest.stats.version_conflicts
        );
    }
}
