//! Check command implementation.
//!
//! Builds the manifest in memory and evaluates it as a CI gate. Which
//! diagnostic classes fail the check comes from the configuration's
//! `fail_on` list (all three by default); `--strict` additionally fails
//! when any skill references another skill without declaring it.
//!
//! Text output prints colored per-diagnostic lines, including did-you-mean
//! suggestions for conflict declarations that point at unknown skills.
//! JSON output is a stable machine-readable report.
//!
//! ```bash
//! skillgraph check                      # text report, exit 1 on findings
//! skillgraph check ./skills --strict
//! skillgraph check --format json | jq .valid
//! ```

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use strsim::levenshtein;

use crate::config::{Config, FailOn};
use crate::graph::{ConflictIssue, ConflictKind};
use crate::manifest::{Manifest, ManifestStats, build_manifest};
use crate::skills::SkillError;
use crate::utils::progress::ProgressBar;

/// Maximum Levenshtein distance for a suggestion, as a percentage of the
/// unknown name's length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Command to validate a skill registry and gate CI on the results.
#[derive(Args)]
pub struct CheckCommand {
    /// Registry root directory (defaults to the configured root)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also fail when skills reference other skills without declaring them
    #[arg(long)]
    pub strict: bool,
}

/// Output format options for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable diagnostics
    Text,
    /// Machine-readable JSON report
    Json,
}

/// Per-skill record of references never declared as dependencies.
#[derive(Debug, Serialize)]
struct InferredDependencies {
    skill: String,
    dependencies: Vec<String>,
}

/// Machine-readable report printed by `--format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport<'a> {
    valid: bool,
    stats: &'a ManifestStats,
    errors: &'a [SkillError],
    circular_dependencies: &'a [Vec<String>],
    version_conflicts: &'a [ConflictIssue],
    inferred_dependencies: &'a [InferredDependencies],
}

impl CheckCommand {
    /// Execute after resolving configuration from an optional explicit path.
    pub async fn execute_with_config_path(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = Config::load(config_path.as_deref())?;
        self.execute(&config).await
    }

    /// Execute the check against a resolved configuration.
    ///
    /// Returns `Err` when any failing diagnostic class is non-empty, which
    /// the binary turns into a non-zero exit code.
    pub async fn execute(self, config: &Config) -> Result<()> {
        let root = self.root.clone().unwrap_or_else(|| config.root.clone());
        let ignore = config.compiled_ignore()?;

        let progress = ProgressBar::new_spinner();
        progress.set_prefix("Checking");
        progress.set_message(root.display().to_string());

        let result = build_manifest(&root, &ignore).await;
        progress.finish_and_clear();
        let manifest = result?;

        let undeclared = undeclared_references(&manifest);
        let failures = evaluate_failures(&manifest, &config.fail_on, self.strict, &undeclared);

        match self.format {
            OutputFormat::Json => {
                let report = CheckReport {
                    valid: failures.is_empty(),
                    stats: &manifest.stats,
                    errors: &manifest.errors,
                    circular_dependencies: &manifest.circular_dependencies,
                    version_conflicts: &manifest.version_conflicts,
                    inferred_dependencies: &undeclared,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => print_report(&manifest, &undeclared, self.strict),
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Check failed: {}", failures.join(", ")))
        }
    }
}

/// Collect every skill whose body references skills it never declares.
fn undeclared_references(manifest: &Manifest) -> Vec<InferredDependencies> {
    manifest
        .skills
        .iter()
        .filter(|(_, entry)| !entry.inferred_dependencies.is_empty())
        .map(|(key, entry)| InferredDependencies {
            skill: key.clone(),
            dependencies: entry.inferred_dependencies.clone(),
        })
        .collect()
}

/// Apply the failure policy, returning one description per failing class.
fn evaluate_failures(
    manifest: &Manifest,
    fail_on: &[FailOn],
    strict: bool,
    undeclared: &[InferredDependencies],
) -> Vec<String> {
    let mut failures = Vec::new();

    if fail_on.contains(&FailOn::Errors) && !manifest.errors.is_empty() {
        failures.push(format!("{} load errors", manifest.errors.len()));
    }

    if fail_on.contains(&FailOn::Cycles) && !manifest.circular_dependencies.is_empty() {
        failures.push(format!(
            "{} circular dependencies",
            manifest.circular_dependencies.len()
        ));
    }

    if fail_on.contains(&FailOn::Conflicts) && !manifest.version_conflicts.is_empty() {
        failures.push(format!(
            "{} conflict issues",
            manifest.version_conflicts.len()
        ));
    }

    if strict && !undeclared.is_empty() {
        failures.push(format!(
            "{} skills with undeclared references",
            undeclared.len()
        ));
    }

    failures
}

/// Print the human-readable report.
fn print_report(manifest: &Manifest, undeclared: &[InferredDependencies], strict: bool) {
    if manifest.errors.is_empty() {
        println!(
            "{} {} skills loaded",
            "✓".green(),
            manifest.stats.total_skills
        );
    } else {
        println!(
            "{} {} skills loaded, {} failed",
            "✗".red(),
            manifest.stats.total_skills,
            manifest.errors.len()
        );
        for error in &manifest.errors {
            println!("    {}: {}", error.skill.bold(), error.error);
        }
    }

    if manifest.circular_dependencies.is_empty() {
        println!("{} No circular dependencies", "✓".green());
    } else {
        println!(
            "{} {} circular dependencies",
            "✗".red(),
            manifest.circular_dependencies.len()
        );
        for cycle in &manifest.circular_dependencies {
            println!("    {}", render_cycle(cycle));
        }
    }

    if manifest.version_conflicts.is_empty() {
        println!("{} No conflict issues", "✓".green());
    } else {
        println!(
            "{} {} conflict issues",
            "✗".red(),
            manifest.version_conflicts.len()
        );
        let known: Vec<String> = manifest.skills.keys().cloned().collect();
        for issue in &manifest.version_conflicts {
            println!("    {}", render_conflict(issue, &known));
        }
    }

    if !undeclared.is_empty() {
        let marker = if strict { "✗".red() } else { "⚠".yellow() };
        println!(
            "{} {} skills reference undeclared dependencies",
            marker,
            undeclared.len()
        );
        for record in undeclared {
            println!(
                "    {}: {}",
                record.skill.bold(),
                record.dependencies.join(", ")
            );
        }
    }
}

/// Render a cycle with the closing edge made explicit.
fn render_cycle(cycle: &[String]) -> String {
    let mut names: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = names.first().copied() {
        names.push(first);
    }
    names.join(" -> ")
}

/// Render one conflict issue, with suggestions for unknown targets.
fn render_conflict(issue: &ConflictIssue, known: &[String]) -> String {
    match issue.kind {
        ConflictKind::MissingConflictTarget => {
            let target = issue.conflicts.first().map_or("", String::as_str);
            let mut line = format!("{} conflicts with unknown skill '{}'", issue.skill, target);

            let similar = find_similar_skills(&target.to_lowercase(), known);
            if !similar.is_empty() {
                line.push_str(&format!(" (did you mean: {}?)", similar.join(", ")));
            }
            line
        }
        ConflictKind::AsymmetricConflict => issue
            .message
            .clone()
            .unwrap_or_else(|| format!("{} declares a one-directional conflict", issue.skill)),
    }
}

/// Find skill names close to an unknown target using Levenshtein distance.
fn find_similar_skills(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> = available
        .iter()
        .map(|name| (name.clone(), levenshtein(target, name)))
        .collect();

    // Sort by distance (closest first)
    scored.sort_by_key(|(_, distance)| *distance);

    scored
        .into_iter()
        .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name)
        .collect()
}
