//! Test utilities for skillgraph
//!
//! Helpers shared by unit and integration tests: one-time logging
//! initialization, SKILL.md content fixtures, and a temporary on-disk
//! registry builder.
//!
//! # Test Isolation
//!
//! Every [`TempRegistry`] owns its temporary directory, so tests never
//! share registry state and cleanup happens on drop.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Result;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::constants::{CONFIG_FILE, SKILL_ENTRY_POINT};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs the tracing subscriber at most once regardless of how many
/// times it is called. Respects the `RUST_LOG` environment variable when
/// set, otherwise uses the provided level; with neither, logging stays
/// off.
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Test fixture for creating sample SKILL.md documents
#[derive(Clone, Debug)]
pub struct SkillFixture {
    /// Skill folder name
    pub name: String,
    /// Full SKILL.md content, header included
    pub content: String,
}

impl SkillFixture {
    /// Minimal valid skill with a name and description
    pub fn basic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: format!(
                "---\n\
                 name: {name}\n\
                 description: A test skill named {name}\n\
                 ---\n\
                 \n\
                 # {name}\n\
                 \n\
                 Body text for {name}.\n"
            ),
        }
    }

    /// Skill declaring hard dependencies on other skills
    pub fn with_dependencies(name: &str, depends_on: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            content: format!(
                "---\n\
                 name: {name}\n\
                 description: A test skill named {name}\n\
                 {}\
                 ---\n\
                 \n\
                 # {name}\n",
                yaml_list("depends_on", depends_on)
            ),
        }
    }

    /// Skill declaring conflicts with other skills
    pub fn with_conflicts(name: &str, conflicts_with: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            content: format!(
                "---\n\
                 name: {name}\n\
                 description: A test skill named {name}\n\
                 {}\
                 ---\n\
                 \n\
                 # {name}\n",
                yaml_list("conflicts_with", conflicts_with)
            ),
        }
    }

    /// Skill whose body references other skills without declaring them
    pub fn with_references(name: &str, references: &[&str]) -> Self {
        let body: String = references
            .iter()
            .map(|target| format!("Works well with [skill:{target}].\n"))
            .collect();
        Self {
            name: name.to_string(),
            content: format!(
                "---\n\
                 name: {name}\n\
                 description: A test skill named {name}\n\
                 ---\n\
                 \n\
                 # {name}\n\
                 \n\
                 {body}"
            ),
        }
    }

    /// Document with no frontmatter header at all
    pub fn missing_header(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: format!("# {name}\n\nNo header in this document.\n"),
        }
    }

    /// Document whose header is not valid YAML
    pub fn malformed_header(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: "---\nname: [unclosed\n---\n\nBody.\n".to_string(),
        }
    }

    /// Skill with caller-provided content, for headers the named
    /// constructors do not cover
    pub fn custom(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    /// Write the skill into a registry root as `<root>/<name>/SKILL.md`
    pub fn write_to(&self, registry_root: &Path) -> Result<PathBuf> {
        let skill_dir = registry_root.join(&self.name);
        fs::create_dir_all(&skill_dir)?;
        let entry_point = skill_dir.join(SKILL_ENTRY_POINT);
        fs::write(&entry_point, &self.content)?;
        Ok(entry_point)
    }
}

fn yaml_list(key: &str, items: &[&str]) -> String {
    let mut block = format!("{key}:\n");
    for item in items {
        block.push_str("  - ");
        block.push_str(item);
        block.push('\n');
    }
    block
}

/// Temporary on-disk skill registry for tests.
///
/// The registry root lives at `<temp>/skills`; the directory above it is
/// the project directory where configuration files go and commands run.
#[derive(Debug)]
pub struct TempRegistry {
    temp_dir: TempDir,
    root: PathBuf,
}

impl TempRegistry {
    /// Create an empty registry under a fresh temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("skills");
        fs::create_dir_all(&root)?;
        Ok(Self { temp_dir, root })
    }

    /// Registry root directory containing the skill folders.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project directory above the registry root.
    pub fn project_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a fixture into the registry.
    pub fn add(&self, fixture: &SkillFixture) -> Result<PathBuf> {
        fixture.write_to(&self.root)
    }

    /// Write a raw SKILL.md under the given folder name.
    pub fn write_skill(&self, folder: &str, content: &str) -> Result<PathBuf> {
        SkillFixture::custom(folder, content).write_to(&self.root)
    }

    /// Create a skill directory with no entry point document.
    pub fn add_bare_directory(&self, folder: &str) -> Result<PathBuf> {
        let dir = self.root.join(folder);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write a `skillgraph.toml` into the project directory.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, content)?;
        Ok(path)
    }
}
