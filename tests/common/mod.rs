//! Common test utilities and fixtures for skillgraph integration tests
//!
//! This module consolidates the registry setup and command execution
//! patterns shared by the integration tests.

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use skillgraph::constants::DEFAULT_MANIFEST_FILE;
use skillgraph::test_utils::{SkillFixture, TempRegistry};

/// Test project wrapping a temporary registry and command execution
pub struct TestProject {
    registry: TempRegistry,
}

impl TestProject {
    /// Create a new test project with an empty registry
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: TempRegistry::new()?,
        })
    }

    /// Registry root directory containing the skill folders
    pub fn registry_root(&self) -> &Path {
        self.registry.root()
    }

    /// Project directory where commands run and config files live
    pub fn project_path(&self) -> &Path {
        self.registry.project_dir()
    }

    /// Add a skill fixture to the registry
    pub fn add_skill(&self, fixture: &SkillFixture) -> Result<PathBuf> {
        self.registry.add(fixture)
    }

    /// Write a raw SKILL.md under the given folder name
    pub fn write_skill(&self, folder: &str, content: &str) -> Result<PathBuf> {
        self.registry.write_skill(folder, content)
    }

    /// Create a skill directory with no entry point document
    pub fn add_bare_directory(&self, folder: &str) -> Result<PathBuf> {
        self.registry.add_bare_directory(folder)
    }

    /// Write a `skillgraph.toml` into the project directory
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.registry.write_config(content)
    }

    /// Path where a default `build` run writes the manifest
    pub fn default_manifest_path(&self) -> PathBuf {
        self.registry.project_dir().join(DEFAULT_MANIFEST_FILE)
    }

    /// Read and parse a manifest written by a build run
    pub fn read_manifest(&self, path: &Path) -> Result<serde_json::Value> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest at {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Manifest at {} is not valid JSON", path.display()))
    }

    /// Run a skillgraph command in the project directory
    pub fn run_skillgraph(&self, args: &[&str]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_skillgraph");
        let output = Command::new(binary)
            .args(args)
            .current_dir(self.registry.project_dir())
            .env("NO_COLOR", "1")
            .env("SKILLGRAPH_NO_PROGRESS", "1")
            .env_remove("SKILLGRAPH_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run skillgraph command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    /// Assert the command exited non-zero
    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.success,
            "Expected command to fail\nStdout: {}\nStderr: {}",
            self.stdout, self.stderr
        );
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }

    /// Parse stdout as JSON
    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!("Stdout is not valid JSON: {}\nActual stdout: {}", e, self.stdout)
        })
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(
            !path.exists(),
            "Expected file to not exist: {}",
            path.display()
        );
    }

    /// Assert a file contains specific content
    pub fn contains(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
        assert!(
            content.contains(expected),
            "Expected file {} to contain '{}'\nActual content: {}",
            path.display(),
            expected,
            content
        );
    }
}
