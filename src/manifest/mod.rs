//! Manifest assembly and serialization for skill registries.
//!
//! A [`Manifest`] is the consolidated output of one registry scan: every
//! loadable skill, the diagnostics produced by the analysis phases, and
//! aggregate counters, stamped with a schema version and a generation
//! timestamp. [`build_manifest`] runs the full pipeline; [`Manifest::save`]
//! and [`Manifest::load`] handle the on-disk JSON form.
//!
//! The manifest is a pure function of the registry snapshot: building twice
//! over an unchanged tree yields identical content apart from `generatedAt`.
//! Diagnostics are data here, not failures. A registry full of cycles and
//! broken headers still produces a manifest; only an unusable registry root
//! aborts the build.
//!
//! # Serialized Form
//!
//! ```json
//! {
//!   "version": 1,
//!   "generatedAt": "2025-03-14T09:26:53.589793+00:00",
//!   "skills": { "git-helper": { "name": "git-helper" } },
//!   "stats": { "totalSkills": 1 },
//!   "errors": [],
//!   "circularDependencies": [],
//!   "versionConflicts": []
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SkillgraphError;
use crate::graph::{
    ConflictIssue, SkillGraph, SkillMap, analyze_conflicts, build_skill_map,
    resolve_inferred_dependencies,
};
use crate::skills::{SkillError, load_skills};
use crate::utils::fs::atomic_write;

/// Manifest schema version stamped into every generated file.
///
/// [`Manifest::load`] refuses files carrying a newer version than this, so
/// older binaries never misread a manifest written by a newer one.
pub const MANIFEST_VERSION: u32 = 1;

/// Aggregate counters over a finished manifest.
///
/// Every count restates the size of a collection elsewhere in the manifest;
/// `skillsWithDependencies` counts entries with a non-empty `dependsOn`
/// (optional dependencies do not count).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestStats {
    /// Number of entries in the skill map
    pub total_skills: usize,
    /// Skills declaring at least one hard dependency
    pub skills_with_dependencies: usize,
    /// Skills declaring at least one conflict
    pub skills_with_conflicts: usize,
    /// Skills that failed to load
    pub errors: usize,
    /// Cycle records found in the dependency graph
    pub circular_dependencies: usize,
    /// Conflict issues found by symmetry checking
    pub version_conflicts: usize,
}

/// The consolidated output of one registry scan.
///
/// Immutable once built. Serializes with the stable camelCase field names
/// shown in the module-level example.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Schema version, always [`MANIFEST_VERSION`] for generated manifests
    pub version: u32,

    /// RFC 3339 timestamp of when this manifest was generated
    pub generated_at: String,

    /// All successfully loaded skills, keyed by lowercased folder name
    pub skills: SkillMap,

    /// Aggregate counters over the collections below
    pub stats: ManifestStats,

    /// Per-skill load failures, one record per broken package
    pub errors: Vec<SkillError>,

    /// Dependency cycles, each an ordered loop of skill names
    pub circular_dependencies: Vec<Vec<String>>,

    /// Dangling and asymmetric `conflicts_with` declarations
    pub version_conflicts: Vec<ConflictIssue>,
}

impl Manifest {
    /// Load a manifest from disk.
    ///
    /// Fails if the file cannot be read, is not valid manifest JSON, or
    /// carries a schema version newer than [`MANIFEST_VERSION`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read manifest: {}", path.display()))?;

        let manifest: Self =
            serde_json::from_str(&content).map_err(|e| SkillgraphError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if manifest.version > MANIFEST_VERSION {
            return Err(SkillgraphError::Other {
                message: format!(
                    "Manifest version {} is newer than supported version {}.\n\
                     Rebuild it with this version of skillgraph.",
                    manifest.version, MANIFEST_VERSION
                ),
            }
            .into());
        }

        Ok(manifest)
    }

    /// Save the manifest to disk atomically.
    ///
    /// Readers of `path` never observe a partially written manifest: content
    /// goes to a temporary sibling first and is renamed into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        atomic_write(path, content.as_bytes())
            .with_context(|| format!("Cannot write manifest: {}", path.display()))?;
        debug!("Wrote manifest to {}", path.display());
        Ok(())
    }

    /// Render the manifest as pretty-printed JSON with a trailing newline.
    ///
    /// This is the exact byte content [`save`](Self::save) writes, also used
    /// when emitting the manifest to stdout.
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        json.push('\n');
        Ok(json)
    }
}

/// Build a manifest from a registry root directory.
///
/// Runs the whole pipeline: parallel skill loading, inferred-dependency
/// resolution, map construction, cycle detection, conflict analysis, and
/// stats aggregation. Per-skill failures land in the manifest's `errors`
/// list; only an absent or unreadable root returns `Err`.
///
/// Directories matching an `ignore` pattern are skipped during discovery.
pub async fn build_manifest(root: &Path, ignore: &[Pattern]) -> Result<Manifest> {
    let loaded = load_skills(root, ignore).await?;

    let entries = resolve_inferred_dependencies(&loaded.entries);
    let skills = build_skill_map(&entries);

    // Analyses require the fully assembled map
    let graph = SkillGraph::from_map(&skills);
    let circular_dependencies = graph.detect_cycles();
    let version_conflicts = analyze_conflicts(&skills);

    let stats = aggregate_stats(
        &skills,
        &loaded.errors,
        &circular_dependencies,
        &version_conflicts,
    );
    debug!(
        "Manifest assembled: {} skills, {} errors, {} cycles, {} conflict issues",
        stats.total_skills, stats.errors, stats.circular_dependencies, stats.version_conflicts
    );

    Ok(Manifest {
        version: MANIFEST_VERSION,
        generated_at: chrono::Utc::now().to_rfc3339(),
        skills,
        stats,
        errors: loaded.errors,
        circular_dependencies,
        version_conflicts,
    })
}

/// Count summary statistics over the finished collections.
fn aggregate_stats(
    skills: &SkillMap,
    errors: &[SkillError],
    cycles: &[Vec<String>],
    conflicts: &[ConflictIssue],
) -> ManifestStats {
    ManifestStats {
        total_skills: skills.len(),
        skills_with_dependencies: skills
            .values()
            .filter(|entry| !entry.depends_on.is_empty())
            .count(),
        skills_with_conflicts: skills
            .values()
            .filter(|entry| !entry.conflicts_with.is_empty())
            .count(),
        errors: errors.len(),
        circular_dependencies: cycles.len(),
        version_conflicts: conflicts.len(),
    }
}
