//! Global constants used throughout the skillgraph codebase.
//!
//! Defining these centrally keeps the fixed filenames and recognized
//! metadata keys discoverable and consistent across modules.

/// Entry-point document filename required at the top level of every skill
/// directory. A directory without this file is recorded as a load error.
pub const SKILL_ENTRY_POINT: &str = "SKILL.md";

/// Default manifest output filename, written to the current directory
/// unless overridden by configuration or `--output`.
pub const DEFAULT_MANIFEST_FILE: &str = "skills-manifest.json";

/// Configuration filename discovered by walking up from the working
/// directory.
pub const CONFIG_FILE: &str = "skillgraph.toml";

/// Environment variable naming an explicit configuration file path.
pub const CONFIG_ENV_VAR: &str = "SKILLGRAPH_CONFIG";

/// Platform identifier keys recognized in skill frontmatter.
///
/// These are checked for presence only; any value under one of these keys
/// marks the skill as targeting that platform. Skills declaring none of
/// them are treated as platform-agnostic (`["*"]`).
pub const PLATFORM_KEYS: &[&str] = &[
    "claude-code",
    "codex",
    "cursor",
    "gemini",
    "opencode",
    "windsurf",
];

/// Wildcard platform marker used when no platform keys are declared.
pub const PLATFORM_ANY: &str = "*";
