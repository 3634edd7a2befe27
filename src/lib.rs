//! Skillgraph - skill registry validator and dependency graph builder
//!
//! Validates a registry of directory-based skills (each described by a
//! SKILL.md document with YAML frontmatter), builds their dependency
//! graph, and emits a single JSON manifest with the loaded metadata,
//! per-skill load errors, circular dependency chains, and conflict
//! diagnostics.
//!
//! # Architecture Overview
//!
//! Skillgraph runs a fixed pipeline over the registry:
//! - Discover the immediate subdirectories of the registry root
//! - Load every SKILL.md in parallel, collecting per-skill failures
//!   instead of aborting
//! - Resolve inferred dependencies (document references never declared)
//! - Build the case-insensitive skill map and dependency graph
//! - Detect circular dependencies and suspicious conflict declarations
//! - Aggregate stats and write the manifest atomically
//!
//! ## Key Features
//!
//! - **Lenient loading**: one broken skill becomes an error record, the
//!   rest of the registry still builds
//! - **Deterministic output**: sorted map keys and a stable pipeline make
//!   rebuilds byte-identical apart from the timestamp
//! - **CI gating**: `skillgraph check` exits non-zero on configurable
//!   diagnostic classes
//! - **Cross-reference analysis**: inline `[skill:...]` mentions are
//!   compared against declared dependencies
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`build` and `check` subcommands)
//! - [`config`] - Optional `skillgraph.toml` discovery and validation
//! - [`core`] - Error types and user-facing error context
//! - [`skills`] - Skill discovery and parallel loading
//! - [`markdown`] - Frontmatter parsing and `[skill:...]` extraction
//! - [`graph`] - Skill map, dependency graph, cycles, conflicts
//! - [`manifest`] - Manifest assembly, serialization, and I/O
//! - [`constants`] - Fixed filenames and recognized metadata keys
//! - [`utils`] - Atomic writes and progress reporting
//!
//! # SKILL.md Format
//!
//! ```yaml
//! ---
//! name: git-helper
//! description: Helps with git workflows
//! version: 1.2.0
//! depends_on:
//!   - shell-runner
//! optional:
//!   - commit-lint
//! conflicts_with:
//!   - legacy-git
//! claude-code:
//!   memory: SKILL.md
//! ---
//! # Git Helper
//!
//! Pairs well with [skill:shell-runner].
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Build the manifest for the skills/ directory
//! skillgraph build ./skills
//!
//! # Write to a custom location, or stream to stdout
//! skillgraph build ./skills --output manifest.json
//! skillgraph build ./skills --stdout | jq .stats
//!
//! # Gate CI on registry health
//! skillgraph check ./skills
//! skillgraph check ./skills --strict --format json
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Registry loading
pub mod markdown;
pub mod skills;

// Analysis and output
pub mod graph;
pub mod manifest;

// Supporting modules
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
