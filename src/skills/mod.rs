//! Skill discovery and loading.
//!
//! Skills are directory-based packages: each immediate subdirectory of the
//! registry root is one skill, identified by its folder name and described
//! by a SKILL.md document with YAML frontmatter.
//!
//! ## SKILL.md Format
//!
//! ```yaml
//! ---
//! name: my-skill
//! description: What this skill does
//! version: 1.2.0          # optional, defaults to 0.0.1
//! tags:                   # optional
//!   - productivity
//! depends_on:             # optional, hard dependency edges
//!   - other-skill
//! optional:               # optional, soft dependency edges
//!   - nice-to-have-skill
//! conflicts_with:         # optional
//!   - legacy-skill
//! claude-code:            # presence of a platform key declares support
//!   memory: SKILL.md
//! ---
//! # Skill content in markdown
//! ```
//!
//! ## Partial Failure
//!
//! Loading is lenient by contract: a skill with a missing SKILL.md or an
//! unparseable header becomes a [`SkillError`] record and the rest of the
//! registry still loads. Header fields that are absent fall back to
//! defaults (folder name, version `0.0.1`, platform `*`). The only fatal
//! failures are registry-level: the root missing, not a directory, or
//! unreadable.
//!
//! ## Async vs Sync Functions
//!
//! Directory traversal and file reads use the synchronous `walkdir` and
//! `std::fs` APIs, wrapped in `spawn_blocking` by [`load_skills`] so the
//! loader can fan out across skills without blocking the Tokio runtime.
//! [`load_skill`] itself is a pure sync function of one directory's
//! contents, which is what makes the fan-out safe: no shared mutable state
//! exists until the results are gathered.

use crate::constants::{PLATFORM_ANY, PLATFORM_KEYS, SKILL_ENTRY_POINT};
use crate::core::SkillgraphError;
use crate::markdown::extract_skill_references;
use crate::markdown::frontmatter::{self, HeaderParser};
use anyhow::{Result, anyhow};
use futures::future::join_all;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A fully loaded skill: resolved metadata plus document-derived facts.
///
/// Serializes with the camelCase field names used throughout the manifest.
/// `inferred_dependencies` starts empty at load time; the analysis phase
/// produces entries with the field filled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    /// Skill name from the header, falling back to the folder name
    pub name: String,

    /// Human-readable description, empty when not declared
    #[serde(default)]
    pub description: String,

    /// Declared version string, `0.0.1` when not declared
    pub version: String,

    /// Categorization labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Names of skills this one declares a hard dependency on
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Soft dependency edges. Carried through to the manifest but never
    /// traversed by cycle detection, conflict analysis, or inference.
    #[serde(default)]
    pub optional: Vec<String>,

    /// Names of skills this one declares a conflict with
    #[serde(default)]
    pub conflicts_with: Vec<String>,

    /// References found in the document but never declared in `depends_on`.
    /// Computed during analysis, not authored.
    #[serde(default)]
    pub inferred_dependencies: Vec<String>,

    /// Deduplicated `[skill:...]` references in order of first appearance
    #[serde(default)]
    pub referenced_skills: Vec<String>,

    /// Path to the SKILL.md document this entry was loaded from
    pub file_path: String,

    /// Number of lines in the SKILL.md document
    pub line_count: usize,

    /// Platforms the skill declares support for, `["*"]` when none declared
    pub platforms: Vec<String>,
}

/// A per-skill loading failure, keyed by the skill's folder name.
///
/// These records accumulate in the manifest's `errors` list instead of
/// aborting the build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillError {
    /// Folder name of the skill that failed to load
    pub skill: String,

    /// Human-readable reason
    pub error: String,
}

/// Explicit result of the loading phase: successfully loaded entries and
/// the per-skill failures encountered along the way.
#[derive(Debug, Clone, Default)]
pub struct LoadedSkills {
    /// Entries that loaded successfully, ordered by folder name
    pub entries: Vec<SkillEntry>,

    /// Per-skill failures, ordered by folder name
    pub errors: Vec<SkillError>,
}

/// List the skill directories directly under a registry root.
///
/// Only immediate subdirectories count as skills. Hidden directories
/// (leading `.`) and directories matching an ignore pattern are skipped.
/// Results are sorted by path for deterministic downstream ordering.
///
/// # Errors
///
/// Returns [`SkillgraphError::RegistryNotFound`] when the root does not
/// exist, [`SkillgraphError::RegistryNotADirectory`] when it is a file,
/// and [`SkillgraphError::RegistryUnreadable`] when listing fails.
pub fn discover_skill_directories(
    root: &Path,
    ignore: &[Pattern],
) -> Result<Vec<PathBuf>, SkillgraphError> {
    if !root.exists() {
        return Err(SkillgraphError::RegistryNotFound {
            path: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        return Err(SkillgraphError::RegistryNotADirectory {
            path: root.display().to_string(),
        });
    }

    let mut skill_dirs = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| SkillgraphError::RegistryUnreadable {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let folder_name = entry.file_name().to_string_lossy();
        if folder_name.starts_with('.') {
            continue;
        }
        if ignore.iter().any(|pattern| pattern.matches(&folder_name)) {
            debug!("Ignoring skill directory '{folder_name}' (matched ignore pattern)");
            continue;
        }

        skill_dirs.push(entry.into_path());
    }

    skill_dirs.sort();
    Ok(skill_dirs)
}

/// Load a single skill from its directory.
///
/// Reads the SKILL.md entry point, parses its header, resolves metadata
/// fields with their defaults, scans the full document for inline skill
/// references, and counts lines. Any failure is converted into a
/// [`SkillError`] record tagged with the folder name; this function never
/// aborts the surrounding build.
pub fn load_skill(skill_dir: &Path) -> Result<SkillEntry, SkillError> {
    let folder_name = skill_dir
        .file_name()
        .map_or_else(|| skill_dir.display().to_string(), |n| n.to_string_lossy().to_string());

    let entry_point = skill_dir.join(SKILL_ENTRY_POINT);
    if !entry_point.is_file() {
        return Err(SkillError {
            skill: folder_name,
            error: "Missing SKILL.md".to_string(),
        });
    }

    let content = match std::fs::read_to_string(&entry_point) {
        Ok(content) => content,
        Err(e) => {
            return Err(SkillError {
                skill: folder_name,
                error: format!("Failed to read SKILL.md: {e}"),
            });
        }
    };

    let bag = match HeaderParser::new().extract(&content) {
        Ok(bag) => bag,
        Err(e) => {
            return Err(SkillError {
                skill: folder_name,
                error: e.to_string(),
            });
        }
    };

    let mut platforms: Vec<String> = PLATFORM_KEYS
        .iter()
        .filter(|key| frontmatter::has_key(&bag, key))
        .map(|key| (*key).to_string())
        .collect();
    if platforms.is_empty() {
        platforms.push(PLATFORM_ANY.to_string());
    }

    Ok(SkillEntry {
        name: frontmatter::string_field(&bag, "name").unwrap_or_else(|| folder_name.clone()),
        description: frontmatter::string_field(&bag, "description").unwrap_or_default(),
        version: frontmatter::string_field(&bag, "version")
            .unwrap_or_else(|| "0.0.1".to_string()),
        tags: frontmatter::string_list_field(&bag, "tags"),
        depends_on: frontmatter::string_list_field(&bag, "depends_on"),
        optional: frontmatter::string_list_field(&bag, "optional"),
        conflicts_with: frontmatter::string_list_field(&bag, "conflicts_with"),
        inferred_dependencies: Vec::new(),
        referenced_skills: extract_skill_references(&content),
        file_path: entry_point.display().to_string(),
        line_count: content.lines().count(),
        platforms,
    })
}

/// Load every skill under a registry root, fanning file I/O out across
/// blocking threads.
///
/// Discovery failures (missing or unreadable root) are the only fatal
/// errors; per-skill failures land in [`LoadedSkills::errors`]. Results
/// come back in discovery order, so both lists are sorted by folder name.
pub async fn load_skills(root: &Path, ignore: &[Pattern]) -> Result<LoadedSkills> {
    let skill_dirs = discover_skill_directories(root, ignore)?;
    debug!("Discovered {} skill directories under {}", skill_dirs.len(), root.display());

    let tasks: Vec<_> = skill_dirs
        .into_iter()
        .map(|dir| tokio::task::spawn_blocking(move || load_skill(&dir)))
        .collect();

    let results = join_all(tasks).await;

    let mut loaded = LoadedSkills::default();
    for result in results {
        match result.map_err(|e| anyhow!("Task join error during skill loading: {}", e))? {
            Ok(entry) => loaded.entries.push(entry),
            Err(error) => loaded.errors.push(error),
        }
    }

    debug!(
        "Loaded {} skills with {} per-skill errors",
        loaded.entries.len(),
        loaded.errors.len()
    );
    Ok(loaded)
}
