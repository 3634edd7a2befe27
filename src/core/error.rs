//! Error types and user-friendly error handling for skillgraph
//!
//! This module provides the error handling infrastructure used throughout the
//! crate. It has two layers:
//!
//! - [`SkillgraphError`] - strongly-typed errors for the failure modes that
//!   abort an invocation (a missing registry root, unusable configuration,
//!   unreadable manifest output)
//! - [`ErrorContext`] - a user-facing wrapper that attaches actionable
//!   suggestions and details for CLI display
//!
//! Per-skill load failures are deliberately *not* errors at this level: they
//! are recorded in the manifest's error list and never abort a build. Only
//! conditions that make the whole invocation meaningless surface here.
//!
//! # Examples
//!
//! ```rust,no_run
//! use skillgraph::core::{SkillgraphError, ErrorContext};
//!
//! let context = ErrorContext::new(SkillgraphError::RegistryNotFound {
//!     path: "./skills".to_string(),
//! })
//! .with_suggestion("Check the registry path or pass a different ROOT argument");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Errors that abort a skillgraph invocation.
///
/// Each variant carries enough context to produce a precise message. The
/// [`user_friendly_error`] function maps these to [`ErrorContext`] values
/// with suggestions for CLI display.
///
/// Note the deliberate asymmetry with the manifest's own diagnostics:
/// a skill directory with a broken `SKILL.md` is data (it lands in the
/// manifest's `errors` list), while a registry root that does not exist is
/// one of these.
#[derive(Error, Debug, Clone)]
pub enum SkillgraphError {
    /// The registry root directory does not exist
    #[error("Skill registry directory not found: {path}")]
    RegistryNotFound {
        /// The path that was expected to be the registry root
        path: String,
    },

    /// The registry root exists but is not a directory
    #[error("Skill registry path is not a directory: {path}")]
    RegistryNotADirectory {
        /// The offending path
        path: String,
    },

    /// The registry root could not be read (permissions, I/O)
    #[error("Cannot read skill registry directory: {path}")]
    RegistryUnreadable {
        /// The registry root path
        path: String,
        /// Underlying reason reported by the OS
        reason: String,
    },

    /// An explicitly requested configuration file does not exist
    ///
    /// Only raised for `--config PATH` / `SKILLGRAPH_CONFIG`; a missing
    /// discovered `skillgraph.toml` is not an error.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The requested configuration path
        path: String,
    },

    /// Configuration file parsing error
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration content failed validation
    #[error("Configuration validation failed: {reason}")]
    ConfigValidationError {
        /// Why the configuration was rejected
        reason: String,
    },

    /// Manifest JSON parsing error
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation being performed (e.g. "write", "read")
        operation: String,
        /// The path involved
        path: String,
    },

    /// Permission denied during a file operation
    #[error("Permission denied during {operation}: {path}")]
    PermissionDenied {
        /// The operation being performed
        operation: String,
        /// The path involved
        path: String,
    },

    /// Catch-all for errors without a dedicated variant
    #[error("{message}")]
    Other {
        /// The error description
        message: String,
    },
}

/// A user-friendly error wrapper with optional suggestion and details.
///
/// Rendered to stderr with color coding: the error in red, details in
/// yellow, the suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SkillgraphError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`SkillgraphError`].
    #[must_use]
    pub const fn new(error: SkillgraphError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions should be actionable steps; they are displayed in green
    /// to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Create an [`ErrorContext`] with only a suggestion (no specific error).
    pub fn suggestion(suggestion: impl Into<String>) -> Self {
        Self {
            error: SkillgraphError::Other {
                message: String::new(),
            },
            suggestion: Some(suggestion.into()),
            details: None,
        }
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions.
///
/// Recognizes [`SkillgraphError`] variants, common [`std::io::Error`] kinds,
/// and TOML parse errors; everything else is rendered with its full cause
/// chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(sg_error) = error.downcast_ref::<SkillgraphError>() {
        return create_error_context(sg_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(SkillgraphError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion(
                    "Check file ownership, or run from a directory you have access to",
                )
                .with_details(
                    "This error occurs when skillgraph doesn't have permission to read or write files",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(SkillgraphError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(SkillgraphError::ConfigParseError {
            file: "skillgraph.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion(
            "Check the TOML syntax in skillgraph.toml. Verify quotes, brackets, and indentation",
        );
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> = error
        .chain()
        .skip(1) // Skip the root cause which is already in to_string()
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SkillgraphError::Other { message })
}

/// Map each [`SkillgraphError`] variant to an [`ErrorContext`] with tailored
/// suggestions. Used by [`user_friendly_error`].
fn create_error_context(error: SkillgraphError) -> ErrorContext {
    match &error {
        SkillgraphError::RegistryNotFound { path } => {
            let path = path.clone();
            ErrorContext::new(error)
                .with_suggestion(format!(
                    "Check that '{path}' exists, or pass a different ROOT argument"
                ))
                .with_details(
                    "skillgraph scans the immediate subdirectories of the registry root for skill packages",
                )
        }

        SkillgraphError::RegistryNotADirectory { .. } => ErrorContext::new(error).with_suggestion(
            "Point skillgraph at the directory that contains one subdirectory per skill",
        ),

        SkillgraphError::RegistryUnreadable { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check directory permissions on the registry root")
                .with_details(reason)
        }

        SkillgraphError::ConfigNotFound { .. } => ErrorContext::new(error).with_suggestion(
            "Check the --config path, or drop the flag to let skillgraph discover skillgraph.toml automatically",
        ),

        SkillgraphError::ConfigParseError { file, .. } => {
            let file = file.clone();
            ErrorContext::new(error).with_suggestion(format!(
                "Check the TOML syntax in {file}. Common issues: missing quotes, unmatched brackets, invalid characters"
            ))
        }

        SkillgraphError::ConfigValidationError { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Valid fail_on values are 'errors', 'cycles', and 'conflicts'; ignore patterns must be valid globs",
            ),

        SkillgraphError::ManifestParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Rebuild the manifest with 'skillgraph build'")
            .with_details("The manifest may have been edited by hand or truncated"),

        _ => ErrorContext::new(error),
    }
}
